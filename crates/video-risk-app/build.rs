use std::env;
use std::fs;
use std::path::PathBuf;

// Exposes the workspace `VERSION` file as `VIDEO_RISK_VERSION`, falling back
// to the package version when the file is absent (for example in a packaged
// crate).
fn main() {
    let package_version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let version_path = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .ok()
        .and_then(|dir| dir.ancestors().nth(2).map(|root| root.join("VERSION")));

    let version = match &version_path {
        Some(path) => {
            println!("cargo:rerun-if-changed={}", path.display());
            fs::read_to_string(path)
                .map(|raw| raw.trim().to_string())
                .ok()
                .filter(|version| !version.is_empty())
                .unwrap_or(package_version)
        }
        None => package_version,
    };

    println!("cargo:rustc-env=VIDEO_RISK_VERSION={version}");
}
