//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the bridge and the rig MUST NOT call sleep
//! methods. Everything is event-driven push; nothing polls.
//! **Exceptions**: test code

use architectural_enforcement::{find_violations, rust_files};

#[test]
fn test_no_sleep_in_production_code() {
    let mut files = rust_files("bridge/core/src");
    files.extend(rust_files("bridge/rig/src"));
    assert!(!files.is_empty(), "no production sources found");

    let violations = find_violations(
        &files,
        &["thread::sleep", "time::sleep", "sleep_until"],
        "Sleep call",
    );

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Sleep in polling loops");
        eprintln!("  - Sleep as poor man's synchronization");
        eprintln!("  - Sleep to 'wait' for host or UI events (subscribe instead)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}
