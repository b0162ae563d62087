//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory and
//! the in-memory store, then verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "yuletide-cli", "--"])
        .args(args)
        .env("YULETIDE_ENV", "dev")
        .env("YULETIDE_STORE", "memory")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Split pretty-printed JSON documents printed back to back.
fn json_documents(stdout: &str) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_str(stdout)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("CLI output is not JSON")
}

#[test]
fn test_countdown_snapshot() {
    let (stdout, _, code) = run_cli(&["countdown", "--year", "2999"]);
    assert_eq!(code, 0);
    let docs = json_documents(&stdout);
    let snapshot = docs.last().unwrap();
    assert_eq!(snapshot["type"], "CountdownSnapshot");
    assert_eq!(snapshot["state"], "counting");
    assert_eq!(snapshot["label"], "Christmas 2999");
    assert_eq!(snapshot["target"], "2999-12-25T00:00:00");
}

#[test]
fn test_countdown_watch_stops_after_ticks() {
    let (stdout, _, code) = run_cli(&["countdown", "--year", "2999", "--watch", "--ticks", "2"]);
    assert_eq!(code, 0);
    let snapshots = stdout
        .lines()
        .filter(|l| l.contains("\"CountdownSnapshot\""))
        .count();
    assert_eq!(snapshots, 2);
}

#[test]
fn test_tree_progress() {
    let (stdout, _, code) = run_cli(&["tree-progress"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let hourly = json["hourly_percent"].as_f64().unwrap();
    assert!((0.0..100.0).contains(&hourly));
}

#[test]
fn test_notify_check_disabled_by_default() {
    let (stdout, _, code) = run_cli(&["notify", "check", "--days", "7"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["type"], "NoNotification");
    assert_eq!(json["enabled"], false);
}

#[test]
fn test_notify_enable_is_granted_for_the_log_notifier() {
    let (stdout, _, code) = run_cli(&["notify", "enable"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["permission"], "granted");
    assert_eq!(json["enabled"], true);
}

#[test]
fn test_prefs_rejects_unknown_key() {
    let (_, stderr, code) = run_cli(&["prefs", "set", "favouriteElf", "Buddy"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown preference key"));
}

#[test]
fn test_scores_submit_first_record() {
    let (stdout, _, code) = run_cli(&["scores", "submit", "snowflakes", "50"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["type"], "HighScore");
    assert_eq!(json["previous"], 0);
}

#[test]
fn test_gifts_add_rejects_blank_name() {
    let (_, stderr, code) = run_cli(&["gifts", "add", "  ", "Grandma"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("must not be blank"));
}

#[test]
fn test_settings_api_get() {
    let (stdout, _, code) = run_cli(&["settings-api", "get"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["theme"], "classic");
    assert_eq!(json["snowIntensity"], 50);
    assert_eq!(json["musicVolume"], 50);
}

#[test]
fn test_settings_api_update() {
    let (stdout, _, code) = run_cli(&["settings-api", "update", "--theme", "aurora"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], true);
}

#[test]
fn test_play_candy_cane_script() {
    let (stdout, _, code) = run_cli(&[
        "play", "stack", "--days", "0", "--seed", "1", "--script", "drop,wait:1200,drop",
    ]);
    assert_eq!(code, 0);
    let docs = json_documents(&stdout);
    let summary = docs.last().unwrap();
    assert_eq!(summary["game"], "stack");
    assert_eq!(summary["score"], 100);
    assert_eq!(summary["phase"]["outcome"], "lost");
    assert!(docs.iter().any(|d| d["type"] == "HighScore"));
}

#[test]
fn test_play_rejects_bad_step() {
    let (_, stderr, code) = run_cli(&["play", "memory", "--days", "0", "--script", "jump"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("flip"));
}

#[test]
fn test_play_rejects_flip_past_the_board() {
    let (_, stderr, code) = run_cli(&["play", "memory", "--days", "0", "--script", "flip:99"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of bounds"));
}

#[test]
fn test_play_locked_game() {
    let (_, stderr, code) = run_cli(&["play", "stack", "--days", "6"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("stack unlocks in 1 days"));
}

#[test]
fn test_unknown_game() {
    let (_, _, code) = run_cli(&["play", "pong"]);
    assert_ne!(code, 0);
}

#[test]
fn test_completions() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("yuletide"));
}
