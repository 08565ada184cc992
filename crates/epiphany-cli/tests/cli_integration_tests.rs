//! CLI integration tests
//!
//! Verify that the CLI loads a schema directory through the registry and
//! reports validation failures with a non-zero exit.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn setup_schema_root(temp_dir: &TempDir) {
    let entity_dir = temp_dir.path().join("lib/epiphany/entity_types");
    let intent_dir = temp_dir.path().join("lib/epiphany/intent_types");
    fs::create_dir_all(&entity_dir).unwrap();
    fs::create_dir_all(&intent_dir).unwrap();

    fs::write(
        entity_dir.join("exercise.json"),
        r#"{"validation_type": "text_match", "known_phrases": ["Squat"]}"#,
    )
    .unwrap();
    fs::write(
        intent_dir.join("find_workout.json"),
        r#"{"find_workout": {"required_entities": ["exercise"]}}"#,
    )
    .unwrap();
}

#[test]
fn test_check_reports_counts() {
    let temp_dir = TempDir::new().unwrap();
    setup_schema_root(&temp_dir);

    let cli_bin = env!("CARGO_BIN_EXE_epiphany-cli");
    let output = Command::new(cli_bin)
        .args(["check", "--root", temp_dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 entity types"));
    assert!(stdout.contains("1 intent types"));
}

#[test]
fn test_check_fails_on_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    setup_schema_root(&temp_dir);
    fs::write(
        temp_dir.path().join("lib/epiphany/entity_types/broken.json"),
        r#"{"validation_type":"#,
    )
    .unwrap();

    let cli_bin = env!("CARGO_BIN_EXE_epiphany-cli");
    let output = Command::new(cli_bin)
        .args(["check", "--root", temp_dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.json"));
}

#[test]
fn test_list_entities_emits_json() {
    let temp_dir = TempDir::new().unwrap();
    setup_schema_root(&temp_dir);

    let cli_bin = env!("CARGO_BIN_EXE_epiphany-cli");
    let output = Command::new(cli_bin)
        .args(["list", "entities", "--root", temp_dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    let entities: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be JSON");
    assert_eq!(entities[0]["type"], "exercise");
    assert_eq!(entities[0]["known_phrases"][0], "Squat");
}
