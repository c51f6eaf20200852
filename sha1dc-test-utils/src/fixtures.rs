//! External collision fixtures.
//!
//! Engineered collision payloads (the SHAttered PDFs and similar) are
//! large published artifacts and are not checked into the repository.
//! Tests that need one resolve it from a fixture directory and skip when
//! it is absent.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable naming the fixture directory.
pub const FIXTURE_DIR_ENV: &str = "SHA1DC_TEST_DATA";

/// Load a collision fixture by file name, e.g. `shattered-1.pdf`.
///
/// Looks in `$SHA1DC_TEST_DATA`, then in `testdata/` at the workspace
/// root. Returns `None` when the fixture is not available; callers should
/// skip their test in that case rather than fail.
pub fn collision_fixture(name: &str) -> Option<Vec<u8>> {
    for dir in candidate_dirs() {
        let path = dir.join(name);
        if let Ok(bytes) = fs::read(&path) {
            return Some(bytes);
        }
    }
    None
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(dir) = env::var(FIXTURE_DIR_ENV) {
        dirs.push(PathBuf::from(dir));
    }
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if let Some(workspace) = manifest.parent() {
        dirs.push(workspace.join("testdata"));
    }
    dirs
}
