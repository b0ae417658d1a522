//! Integration tests for the `va` CLI binary.

use assert_cmd::Command;
use predicates::prelude::*;

const OVERRIDE_KEYS: &[&str] = &[
    "VISIBLE_ASSERTIONS_ANSI_ENABLED",
    "VISIBLE_ASSERTIONS_ANSI_STRIP",
    "VISIBLE_ASSERTIONS_ANSI_PASSTHROUGH",
    "VISIBLE_ASSERTIONS_ANSI_FORCE",
    "CLICOLOR_FORCE",
    "NO_COLOR",
];

/// `va` with every override key cleared.
fn va() -> Command {
    let mut cmd = Command::cargo_bin("va").unwrap();
    for key in OVERRIDE_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_no_args_prints_capability_report() {
    va().assert()
        .success()
        .stdout(predicate::str::contains("is_tty: false"))
        .stdout(predicate::str::contains("is_under_build_tool:"))
        .stdout(predicate::str::contains("ansi_enabled:"))
        .stdout(predicate::str::contains(
            "This text will be green if ANSI output is enabled",
        ));
}

#[test]
fn test_json_report_is_valid_json() {
    let output = va().arg("--json").output().expect("Failed to execute command");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(json["is_tty"], false);
    assert!(json["ansi_enabled"].is_boolean());
    assert!(json["decided_by"].is_string());
    // stdout is piped, so the terminal cannot be queried
    assert_eq!(json["width"], 80);
    assert_eq!(json["height"], 24);
}

#[test]
fn test_no_color_strips_escape_codes() {
    va().env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not())
        .stdout(predicate::str::contains("ansi_enabled: false (decided by strip)"));
}

#[test]
fn test_absolute_override_enables_styling() {
    va().env("VISIBLE_ASSERTIONS_ANSI_ENABLED", "true")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\x1b[32mThis text will be green if ANSI output is enabled\x1b[0m",
        ))
        .stdout(predicate::str::contains("decided by absolute"));
}

#[test]
fn test_render_forced_modes() {
    va().args(["render", "--ansi", "@|red hi|@ there"])
        .assert()
        .success()
        .stdout("\x1b[31mhi\x1b[0m there\n");

    va().args(["render", "--plain", "@|red,bold hi|@", "there"])
        .assert()
        .success()
        .stdout("hi there\n");
}

#[test]
fn test_render_conflicting_modes_rejected() {
    va().args(["render", "--ansi", "--plain", "x"]).assert().failure();
}

#[test]
fn test_render_unknown_style_fails() {
    va().args(["render", "--plain", "@|sparkly x|@"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown style `sparkly`"));
}

#[test]
fn test_render_json() {
    let output = va()
        .args(["--json", "render", "--plain", "@|green ok|@"])
        .output()
        .expect("Failed to execute command");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rendered"], "ok");
    assert_eq!(json["ansi"], false);
}

#[test]
fn test_demo_runs() {
    va().env("NO_COLOR", "1")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{2714} two plus two is four"))
        .stdout(predicate::str::contains("\u{2714} words are not numbers"))
        .stdout(predicate::str::contains("\u{2718} greeting matches"))
        .stdout(predicate::str::contains(
            "'goodbye' does not equal expected 'hello'",
        ));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("va.yaml");
    std::fs::write(&path, "terminal_width: 40\noverrides:\n  ansi_enabled: true\n").unwrap();

    let output = va()
        .env("NO_COLOR", "1")
        .arg("--json")
        .arg("--config")
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ansi_enabled"], true);
    assert_eq!(json["width"], 40);
    assert_eq!(json["overrides"]["ansi_enabled"], true);
}

#[test]
fn test_missing_config_file_fails() {
    va().args(["--config", "/definitely/not/here.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read config file"));
}

#[test]
fn test_completions() {
    va().args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("va"));

    va().args(["--completions", "tcsh"]).assert().failure();
}

#[test]
fn test_help_flag() {
    va().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Show how visible-assertions will render here"));
}
