//! Shared test utilities for enx integration tests.
//!
//! Invariants / Assumptions:
//! - Commands never see the host's `ENX_ENV` or `NODE_ENV`.
//! - Every command runs inside its own temporary directory.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Returns a hermetic `enx` command rooted at `dir`.
pub fn enx_cmd(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("enx");
    cmd.current_dir(dir.path())
        .env_remove("ENX_ENV")
        .env_remove("NODE_ENV")
        .env_remove("RUST_LOG");
    cmd
}

/// Creates a temporary directory holding the given `(name, contents)` files.
pub fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}
