use std::env;
use std::fs;
use std::path::Path;

include!("../build_common.rs");

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    process_readme_for_rustdoc(&crate_dir);

    // Workspace root (two directories up from crates/teatrack-core)
    let repo_root = Path::new(&crate_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map_or_else(|| Path::new(&crate_dir).to_path_buf(), Path::to_path_buf);

    println!(
        "cargo:rustc-env=TEATRACK_REPO_ROOT={}",
        repo_root.to_string_lossy()
    );
    println!("cargo:rerun-if-changed=build.rs");
}
