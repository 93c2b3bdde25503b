//! Integration Test: Non-Blocking Relays
//!
//! **Policy**: Relays run on a single cooperative dispatch thread. A relay
//! handler, and every capability it calls, must run to completion without
//! blocking or suspending.
//!
//! **Checked**: `bridge/core/src/relay`, `bridge/core/src/channel`,
//! `bridge/core/src/host.rs`, `bridge/core/src/config.rs`

use architectural_enforcement::{find_violations, rust_files, workspace_root};

const SUSPENDING: &[&str] = &[".await", "async fn", "async move", "block_on", "blocking_"];

fn dispatch_path_files() -> Vec<std::path::PathBuf> {
    let mut files = rust_files("bridge/core/src/relay");
    files.extend(rust_files("bridge/core/src/channel"));
    for file in ["bridge/core/src/host.rs", "bridge/core/src/config.rs"] {
        let path = workspace_root().join(file);
        if path.exists() {
            files.push(path);
        }
    }
    files
}

#[test]
fn test_dispatch_path_is_scanned() {
    let files = dispatch_path_files();
    assert!(
        files.len() >= 6,
        "expected relay, channel, host and config sources, found {files:?}"
    );
}

#[test]
fn test_relays_never_suspend() {
    let violations = find_violations(&dispatch_path_files(), SUSPENDING, "Suspending call");

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Suspending or blocking calls found on the dispatch path!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ REQUIRED:");
        eprintln!("  - Relays call HostPlatform / UiChannel synchronously");
        eprintln!("  - Host calls are fire-and-forget, UI pushes never wait");

        panic!(
            "\nFound {} suspending call(s) on the dispatch path.\nFix these before merging!",
            violations.len()
        );
    }
}
