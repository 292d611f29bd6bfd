//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The showroom core stays headless (no terminal crates)
//! - No thread sleeps or blocking file I/O on the event loop
//! - No panicking shortcuts in production code
//!
//! The helpers below scan the workspace sources; the checks live in `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Every `.rs` file under a workspace-relative directory
pub fn rust_sources(relative: &str) -> Vec<PathBuf> {
    let dir = workspace_root().join(relative);
    assert!(dir.exists(), "{} does not exist", dir.display());

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("rs"))
        .collect();
    files.sort();
    files
}

/// A line of production code with comments stripped
#[derive(Debug)]
pub struct CodeLine {
    /// 1-based line number
    pub number: usize,
    /// Code before any `//`
    pub code: String,
    /// Whether the enclosing function is `async`
    pub in_async_fn: bool,
}

/// Production lines of a source file
///
/// Stops at the first `#[cfg(test)]`; test modules sit at the end of each
/// file in this workspace.
pub fn production_lines(content: &str) -> Vec<CodeLine> {
    let mut in_async_fn = false;
    let mut lines = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        let code = line.split("//").next().unwrap_or(line);
        if code.contains("fn ") {
            in_async_fn = code.contains("async fn ");
        }
        if code.trim().is_empty() {
            continue;
        }
        lines.push(CodeLine {
            number: idx + 1,
            code: code.to_string(),
            in_async_fn,
        });
    }
    lines
}

/// Find production lines matching `violates` under the given directories
pub fn scan(dirs: &[&str], violates: impl Fn(&CodeLine) -> bool) -> Vec<String> {
    let mut violations = Vec::new();
    for dir in dirs {
        for path in rust_sources(dir) {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            for line in production_lines(&content) {
                if violates(&line) {
                    violations.push(format!(
                        "{}:{} - {}",
                        path.display(),
                        line.number,
                        line.code.trim()
                    ));
                }
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_skip_comments_and_tests() {
        let src = "fn a() {\n    // std::thread::sleep\n    let x = 1; // trailing\n}\n\n#[cfg(test)]\nmod tests {\n    fn b() { x.unwrap(); }\n}\n";
        let lines = production_lines(src);
        let codes: Vec<_> = lines.iter().map(|l| l.code.trim()).collect();
        assert_eq!(codes, vec!["fn a() {", "let x = 1;", "}"]);
    }

    #[test]
    fn test_async_context_tracking() {
        let src = "async fn a() {\n    go();\n}\nfn b() {\n    stop();\n}\n";
        let lines = production_lines(src);
        assert!(lines[1].in_async_fn);
        assert!(!lines[4].in_async_fn);
    }
}
