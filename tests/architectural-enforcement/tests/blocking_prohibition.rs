//! Integration Test: Blocking Prohibition
//!
//! **Policy**: Everything runs on one tokio event loop. Production code MUST NOT
//! park the thread (`std::thread::sleep`) and async code MUST NOT use blocking
//! file I/O (`std::fs`). Timers go through `tokio::time`, file reads through
//! `tokio::fs`. Synchronous startup code (config loading) may use `std::fs`.
//!
//! Production code also MUST NOT `unwrap()`/`expect()`; errors propagate.

use mirra_architectural_enforcement::scan;

const PRODUCTION_DIRS: [&str; 2] = ["showroom/core/src", "tui/src"];

fn report(violations: &[String], rule: &str) {
    if violations.is_empty() {
        return;
    }
    eprintln!("\n❌ CRITICAL: {rule}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[test]
fn test_no_thread_sleep_in_production_code() {
    let violations = scan(&PRODUCTION_DIRS, |line| line.code.contains("thread::sleep"));
    report(&violations, "thread sleeps block the event loop; use tokio::time");
}

#[test]
fn test_no_blocking_fs_in_async_code() {
    let violations = scan(&PRODUCTION_DIRS, |line| {
        line.in_async_fn && line.code.contains("std::fs")
    });
    report(&violations, "blocking file I/O in async code; use tokio::fs");
}

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan(&PRODUCTION_DIRS, |line| {
        line.code.contains(".unwrap()") || line.code.contains(".expect(")
    });
    report(&violations, "unwrap/expect in production code; propagate the error");
}
