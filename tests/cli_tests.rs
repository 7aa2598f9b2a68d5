use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};

mod common;
use common::rat_in;

/// Write a logged-in session into `home` and return its path.
fn write_session(home: &Path) -> PathBuf {
    let path = home.join("session.json");
    let stored = serde_json::json!({
        "token": "tok-1",
        "user": r#"{"id":1,"name":"Ana","email":"ana@example.com"}"#,
    });
    fs::write(&path, stored.to_string()).unwrap();
    path
}

#[test]
fn init_creates_config_and_print_shows_it() {
    let home = tempfile::tempdir().unwrap();

    rat_in(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    let conf = home.path().join(".rattendance").join("rattendance.conf");
    let content = fs::read_to_string(&conf).unwrap();
    assert!(content.contains("api_base_url:"));
    assert!(content.contains("127.0.0.1:9/api"));
    assert!(content.contains("redirect_delay_ms: 2000"));

    rat_in(home.path())
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("session_file"));
}

#[test]
fn protected_commands_require_login() {
    let home = tempfile::tempdir().unwrap();

    for args in [
        vec!["status"],
        vec!["today"],
        vec!["history"],
        vec!["locations"],
        vec!["scan", "--payload", "{}", "--action", "clock_in"],
        vec!["qr", "--location", "LOC001"],
    ] {
        rat_in(home.path())
            .args(&args)
            .assert()
            .failure()
            .stderr(contains("Not logged in"));
    }
}

#[test]
fn login_failure_reports_fallback_message() {
    let home = tempfile::tempdir().unwrap();

    rat_in(home.path())
        .args(["login", "--email", "ana@example.com", "--password", "x"])
        .assert()
        .failure()
        .stderr(contains("Login failed!"));

    assert!(!home.path().join(".rattendance").join("session.json").exists());
}

#[test]
fn guest_commands_are_skipped_with_a_session() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());

    rat_in(home.path())
        .args(["--session", session.to_str().unwrap()])
        .args(["login", "--email", "other@example.com", "--password", "x"])
        .assert()
        .success()
        .stdout(contains("Already logged in as ana@example.com"));
}

#[test]
fn failed_logout_keeps_session_unless_forced() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());
    let session_arg = session.to_str().unwrap();

    rat_in(home.path())
        .args(["--session", session_arg, "logout"])
        .assert()
        .failure()
        .stderr(contains("Logout failed!"));
    assert!(session.exists());

    rat_in(home.path())
        .args(["--session", session_arg, "logout", "--force"])
        .assert()
        .success()
        .stdout(contains("Local session removed"));
    assert!(!session.exists());
}

#[test]
fn manual_scan_is_rejected_outside_test_mode() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());

    rat_in(home.path())
        .args(["--session", session.to_str().unwrap()])
        .args(["scan", "--manual", "--action", "clock_in"])
        .assert()
        .failure()
        .stderr(contains("Manual QR entry is only available in test mode"));
}

#[test]
fn manual_scan_in_test_mode_uses_demo_location() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());

    rat_in(home.path())
        .args(["--session", session.to_str().unwrap(), "--test"])
        .args(["scan", "--manual", "--action", "clock_in"])
        .assert()
        .failure()
        .stdout(contains("Office Building A"))
        .stderr(contains("Error:"));
}

#[test]
fn malformed_payload_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());

    rat_in(home.path())
        .args(["--session", session.to_str().unwrap()])
        .args(["scan", "--payload", "hello", "--action", "clock_in"])
        .assert()
        .failure()
        .stderr(contains("Invalid QR Code format"));
}

#[test]
fn qr_without_location_asks_for_one() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());

    rat_in(home.path())
        .args(["--session", session.to_str().unwrap(), "--test", "qr"])
        .assert()
        .failure()
        .stderr(contains("Please select a location").and(contains("Failed to load locations")));
}

#[test]
fn bad_inputs_fail_before_any_request() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());
    let session_arg = session.to_str().unwrap();

    rat_in(home.path())
        .args(["--session", session_arg, "summary", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rat_in(home.path())
        .args(["--session", session_arg, "history", "--param", "oops"])
        .assert()
        .failure()
        .stderr(contains("expected KEY=VALUE"));

    rat_in(home.path())
        .args(["--session", session_arg, "scan", "--payload", "{}", "--action", "dance"])
        .assert()
        .failure()
        .stderr(contains("Unknown action 'dance'"));
}

#[test]
fn unreachable_server_surfaces_an_error() {
    let home = tempfile::tempdir().unwrap();
    let session = write_session(home.path());

    rat_in(home.path())
        .args(["--session", session.to_str().unwrap(), "today"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}
