// steplog - build.rs
//
// Records the version of the compiler that built the crate so the startup
// banner can report it. Uses the `RUSTC` path cargo hands to build scripts
// rather than whatever `rustc` happens to be first on PATH.
//
// If the compiler cannot be queried the banner falls back to "unknown".
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = std::process::Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=STEPLOG_RUSTC_VERSION={version}");
}
