//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - Relays and the capabilities they call never block or suspend
//! - No sleep() calls in production code
//!
//! These tests are designed to catch violations early in the development cycle.
//! The helpers below are shared by the test files under `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, resolved from this package's manifest directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// All `.rs` files under `dir`, relative to the workspace root
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production code lines of a file as `(line_number, code_without_comment)`
///
/// Stops at the first `#[cfg(test)]`; test modules sit at the end of each
/// file in this workspace.
pub fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| {
            let code_part = line.split("//").next().unwrap_or(line);
            (idx + 1, code_part.to_string())
        })
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Scan `files` for any of `patterns`, formatting one entry per hit
pub fn find_violations(files: &[PathBuf], patterns: &[&str], label: &str) -> Vec<String> {
    let mut violations = Vec::new();
    for file in files {
        for (line_number, code) in production_lines(file) {
            if patterns.iter().any(|p| code.contains(p)) {
                violations.push(format!(
                    "{}:{} - {}: {}",
                    file.display(),
                    line_number,
                    label,
                    code.trim()
                ));
            }
        }
    }
    violations
}
