//! Common test helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

/// Write a rule file with the given name into `dir` and return its path.
pub fn write_rules(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("failed to write rule file");
    path
}

/// Remove a process environment variable, ignoring whether it was set.
#[allow(dead_code)]
pub fn clear_var(name: &str) {
    std::env::remove_var(name);
}
