fn main() {
    // On macOS, link against the Accelerate framework for LAPACK (DGEES)
    #[cfg(target_os = "macos")]
    {
        println!("cargo:rustc-link-lib=framework=Accelerate");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
