//! Helpers for loading the frozen wire contracts under `contracts/`.

use std::path::PathBuf;

/// Returns the path of a file under the workspace `contracts/` directory.
pub fn contract_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../contracts")
        .join(relative)
}

/// Reads a contract file as raw text.
///
/// # Panics
/// Panics when the file is missing; contract files are part of the repo.
pub fn read_contract(relative: &str) -> String {
    let path = contract_path(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("{} should be readable: {error}", path.display()))
}
