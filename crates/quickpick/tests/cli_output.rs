//! Integration tests for the quickpick binary.
//!
//! Each test runs in its own temp directory with HOME pointed at it, so no
//! user or project config leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_quickpick(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quickpick"))
        .current_dir(dir)
        .env("HOME", dir)
        .args(args)
        .output()
        .expect("Failed to execute quickpick")
}

fn write_definition(dir: &Path, content: &str) -> String {
    let path = dir.join("picker.toml");
    fs::write(&path, content).expect("Failed to write picker definition");
    path.display().to_string()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "quickpick failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_simulate_single_select_json() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let definition = write_definition(
        temp_dir.path(),
        r#"
title = "Fruit"
items = ["Apple", "Banana", "Cherry"]
"#,
    );

    let output = run_quickpick(
        temp_dir.path(),
        &["-q", "simulate", &definition, "--action", "press:1", "--json"],
    );
    let report = stdout_json(&output);

    assert_eq!(report["picker_type"], "list");
    assert_eq!(report["committed"][0]["kind"], "value");
    assert_eq!(report["committed"][0]["value"], "Banana");
    assert_eq!(report["navigation"][0]["kind"], "navigate");
    assert_eq!(report["navigation"][0]["route"], "PickerScreen");
    assert_eq!(report["navigation"][1]["kind"], "go_back");
    assert_eq!(report["final_state"]["phase"], "idle");
}

#[test]
fn test_simulate_multi_select_filter_then_confirm() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let definition = write_definition(
        temp_dir.path(),
        r#"
items = ["Apple", "Banana", "Cherry"]
is_multi_select = true
can_filter = true
selected_values = ["Apple"]
"#,
    );

    let output = run_quickpick(
        temp_dir.path(),
        &[
            "-q", "simulate", &definition, "-a", "filter:an", "-a", "press:1", "-a", "confirm",
            "--json",
        ],
    );
    let report = stdout_json(&output);

    assert_eq!(report["steps"][0]["outcome"]["visible_rows"], 1);
    assert_eq!(report["committed"][0]["kind"], "values");
    assert_eq!(
        report["committed"][0]["values"],
        serde_json::json!(["Apple", "Banana"])
    );
}

#[test]
fn test_simulate_veto_keeps_picker_open() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let definition = write_definition(temp_dir.path(), r#"items = ["a", "b"]"#);

    let output = run_quickpick(
        temp_dir.path(),
        &["-q", "simulate", &definition, "-a", "cancel", "--veto", "--json"],
    );
    let report = stdout_json(&output);

    assert_eq!(report["steps"][0]["outcome"]["close"], "vetoed");
    assert_eq!(report["final_state"]["phase"], "opening");
    assert_eq!(report["navigation"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_simulate_plain_output() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let definition = write_definition(temp_dir.path(), r#"items = ["a", "b"]"#);

    let output = run_quickpick(temp_dir.path(), &["-q", "simulate", &definition, "-a", "press:0"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Picker: list"), "got: {}", stdout);
    assert!(stdout.contains("value: a"), "got: {}", stdout);
    assert!(stdout.contains("go back"), "got: {}", stdout);
}

#[test]
fn test_simulate_rejects_unknown_action() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let definition = write_definition(temp_dir.path(), r#"items = ["a"]"#);

    let output = run_quickpick(
        temp_dir.path(),
        &["-q", "simulate", &definition, "-a", "jump"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_simulate_missing_definition_fails() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = run_quickpick(temp_dir.path(), &["-q", "simulate", "missing.toml"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load picker definition"),
        "got: {}",
        stderr
    );
}

#[test]
fn test_config_json_uses_project_settings() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join(".quickpick");
    fs::create_dir_all(&config_dir).expect("Failed to create .quickpick dir");
    fs::write(
        config_dir.join("config.toml"),
        r#"
[surface]
platform = "android"

[datetime]
settle_delay_ms = 250
"#,
    )
    .expect("Failed to write config");

    let output = run_quickpick(temp_dir.path(), &["-q", "config", "--json"]);
    let settings = stdout_json(&output);

    assert_eq!(settings["platform"], "android");
    assert_eq!(settings["settle_delay_ms"], 250);
    assert_eq!(
        settings["native_types"],
        serde_json::json!(["time", "date", "datetime"])
    );
    assert_eq!(settings["screen_route"], "PickerScreen");
}

#[test]
fn test_config_warning_on_invalid_toml() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join(".quickpick");
    fs::create_dir_all(&config_dir).expect("Failed to create .quickpick dir");
    fs::write(config_dir.join("config.toml"), "invalid toml [[[")
        .expect("Failed to write invalid config");

    let output = run_quickpick(temp_dir.path(), &["config"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
}
