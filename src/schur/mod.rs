//! Real Schur decomposition (LAPACK DGEES).
//!
//! For a real square matrix A this computes an orthogonal `U` and a
//! quasi-upper-triangular `T` with `A = U T Uᵗ`. Real eigenvalues appear on
//! the diagonal of `T`; each complex-conjugate pair occupies a standardized
//! 2×2 block whose two diagonal entries both equal the pair's real part.
//!
//! The controllability formulas in [`crate::ctrb`] read `diag(T)` as the
//! eigenvalue vector. For complex pairs this keeps only the real part, an
//! approximation inherited from the published formulas. The exact spectrum
//! is still available through [`SchurDecomposition::eigenvalues`].

use ndarray::{Array1, Array2, ShapeBuilder};
use num_complex::Complex;
use std::os::raw::{c_char, c_double, c_int};
use tracing::trace;

use crate::error::{NumericalError, Result};
use crate::norm::ensure_square;

type SelectFn = Option<unsafe extern "C" fn(*const c_double, *const c_double) -> c_int>;

// LAPACK FFI bindings
extern "C" {
    /// DGEES: Schur factorization of a real nonsymmetric matrix
    fn dgees_(
        jobvs: *const c_char,
        sort: *const c_char,
        select: SelectFn,
        n: *const c_int,
        a: *mut c_double,
        lda: *const c_int,
        sdim: *mut c_int,
        wr: *mut c_double,
        wi: *mut c_double,
        vs: *mut c_double,
        ldvs: *const c_int,
        work: *mut c_double,
        lwork: *const c_int,
        bwork: *mut c_int,
        info: *mut c_int,
    );
}

/// Result of a real Schur decomposition `A = U T Uᵗ`.
#[derive(Clone, Debug)]
pub struct SchurDecomposition {
    t: Array2<f64>,
    z: Array2<f64>,
    wr: Array1<f64>,
    wi: Array1<f64>,
}

impl SchurDecomposition {
    /// Order N of the decomposed matrix.
    pub fn order(&self) -> usize {
        self.t.nrows()
    }

    /// Quasi-upper-triangular Schur form `T`.
    pub fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// Orthogonal Schur vectors `U` (columns are the Schur basis).
    pub fn z(&self) -> &Array2<f64> {
        &self.z
    }

    /// `diag(T)`, the eigenvalue approximation used by the controllability
    /// metrics.
    pub fn diag(&self) -> Array1<f64> {
        self.t.diag().to_owned()
    }

    /// Eigenvalues as reported by DGEES, `wr + i·wi`, in the order of the
    /// diagonal of `T`.
    pub fn eigenvalues(&self) -> Array1<Complex<f64>> {
        self.wr
            .iter()
            .zip(self.wi.iter())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }

    /// Number of 2×2 blocks (complex-conjugate pairs) in `T`.
    pub fn complex_pairs(&self) -> usize {
        self.wi.iter().filter(|&&im| im > 0.0).count()
    }

    /// Recomputes `U T Uᵗ`.
    pub fn reconstruct(&self) -> Array2<f64> {
        self.z.dot(&self.t).dot(&self.z.t())
    }

    /// Splits into `(T, U)`.
    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>) {
        (self.t, self.z)
    }
}

/// Computes the real Schur decomposition of a square matrix.
///
/// # Arguments
///
/// * `a` - N×N real matrix, N >= 1. Not modified.
///
/// # Returns
///
/// [`SchurDecomposition`] holding `T`, `U` and the eigenvalues.
///
/// # Errors
///
/// * [`ControlError::Dimension`](crate::error::ControlError::Dimension) if
///   `a` is empty or not square
/// * [`NumericalError::Schur`] if DGEES reports an illegal argument or the
///   QR algorithm fails to converge
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use netctrl::schur::schur;
///
/// let a = arr2(&[[0.5, 1.0], [0.0, -0.25]]);
/// let s = schur(&a).unwrap();
/// let mut d = s.diag().to_vec();
/// d.sort_by(|x, y| x.partial_cmp(y).unwrap());
/// assert!((d[0] + 0.25).abs() < 1e-12);
/// assert!((d[1] - 0.5).abs() < 1e-12);
/// ```
///
/// # LAPACK Integration
///
/// Calls DGEES with `JOBVS='V'` and `SORT='N'`. ndarray stores matrices
/// row-major while LAPACK expects column-major, so the input is copied into
/// a Fortran-ordered buffer and `T`, `U` are read back with `.f()` shapes.
/// Workspace size is obtained with an `LWORK=-1` query first.
pub fn schur(a: &Array2<f64>) -> Result<SchurDecomposition> {
    ensure_square(a)?;
    let n = a.nrows();

    // Column-major copy of A: iterating Aᵗ in logical order walks A by columns
    let mut a_col_major: Vec<f64> = a.t().iter().copied().collect();
    let mut vs = vec![0.0f64; n * n];
    let mut wr = vec![0.0f64; n];
    let mut wi = vec![0.0f64; n];
    let mut bwork: Vec<c_int> = vec![0; n];

    let jobvs = b'V' as c_char;
    let sort = b'N' as c_char;
    let n_i32 = n as c_int;
    let mut sdim: c_int = 0;
    let mut info: c_int = 0;

    // Query optimal workspace size (lwork = -1)
    let mut work_query = [0.0f64];
    unsafe {
        dgees_(
            &jobvs,
            &sort,
            None,
            &n_i32,
            a_col_major.as_mut_ptr(),
            &n_i32,
            &mut sdim,
            wr.as_mut_ptr(),
            wi.as_mut_ptr(),
            vs.as_mut_ptr(),
            &n_i32,
            work_query.as_mut_ptr(),
            &-1,
            bwork.as_mut_ptr(),
            &mut info,
        );
    }
    if info != 0 {
        return Err(NumericalError::Schur { info }.into());
    }

    let optimal_lwork = work_query[0] as usize;
    let mut work = vec![0.0f64; optimal_lwork.max(3 * n).max(1)];
    let lwork = work.len() as c_int;

    unsafe {
        dgees_(
            &jobvs,
            &sort,
            None,
            &n_i32,
            a_col_major.as_mut_ptr(),
            &n_i32,
            &mut sdim,
            wr.as_mut_ptr(),
            wi.as_mut_ptr(),
            vs.as_mut_ptr(),
            &n_i32,
            work.as_mut_ptr(),
            &lwork,
            bwork.as_mut_ptr(),
            &mut info,
        );
    }
    if info != 0 {
        return Err(NumericalError::Schur { info }.into());
    }

    let t = from_col_major(n, a_col_major)?;
    let z = from_col_major(n, vs)?;
    trace!(order = n, ?wr, ?wi, "real Schur form computed");

    Ok(SchurDecomposition {
        t,
        z,
        wr: Array1::from(wr),
        wi: Array1::from(wi),
    })
}

/// Rebuilds a standard-layout N×N array from a Fortran-ordered buffer.
fn from_col_major(n: usize, data: Vec<f64>) -> Result<Array2<f64>> {
    let fortran = Array2::from_shape_vec((n, n).f(), data)
        .map_err(|_| NumericalError::Schur { info: -4 })?;
    Ok(fortran.as_standard_layout().into_owned())
}
