//! Integration Test: Headless Core
//!
//! **Policy**: `mirra-core` owns interaction state only. It MUST NOT depend on
//! ratatui, crossterm or any other terminal crate; surfaces render it.

use std::fs;

use mirra_architectural_enforcement::{scan, workspace_root};

const TERMINAL_CRATES: [&str; 2] = ["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_terminal_crates() {
    let manifest = fs::read_to_string(workspace_root().join("showroom/core/Cargo.toml"))
        .expect("core manifest");

    for krate in TERMINAL_CRATES {
        let declared = manifest
            .lines()
            .map(str::trim)
            .any(|l| l.starts_with(krate) && l[krate.len()..].trim_start().starts_with(['=', '.']));
        assert!(!declared, "mirra-core must not depend on {krate}");
    }
}

#[test]
fn test_core_sources_never_use_terminal_crates() {
    let violations = scan(&["showroom/core/src"], |line| {
        TERMINAL_CRATES
            .iter()
            .any(|krate| line.code.contains(&format!("{krate}::")))
    });

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} terminal crate reference(s) in mirra-core.\nMove rendering code to the TUI.",
            violations.len()
        );
    }
}
