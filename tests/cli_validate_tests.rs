//! End-to-end tests for `tripdeck validate` command.

use serde_json::Value;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_valid_layout() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&paris_trip());

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Valid layout should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
    assert!(stdout.contains("Sections: 6"));
    // The bottom-positioned "print" action is reported
    assert!(stdout.contains("Warnings: 1"));
}

#[test]
fn test_validate_valid_layout_json() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&paris_trip());

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", layout_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let result: Value = serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], true);
    assert_eq!(result["errors"].as_array().unwrap().len(), 0);
    assert_eq!(result["warnings"][0]["kind"], "non_floating_action");
    assert_eq!(result["warnings"][0]["path"], "actions[1]");
}

#[test]
fn test_validate_duplicate_ids_fails() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&layout_with_duplicate_ids());

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", layout_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(1),
        "Duplicate ids should exit with code 1"
    );

    let result: Value = serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], false);
    assert_eq!(result["errors"][0]["kind"], "duplicate_section_id");
    assert_eq!(result["errors"][0]["path"], "sections[1]");
}

#[test]
fn test_validate_unknown_type_is_warning() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&layout_with_unknown_type());

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("⚠"));
    assert!(stdout.contains("holo-deck"));
}

#[test]
fn test_validate_strict_mode_fails_on_warnings() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&layout_with_unknown_type());

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", layout_path.to_str().unwrap(), "--strict"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("strict"));
}

#[test]
fn test_validate_depth_uses_configured_limit() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "[render]\nmax_depth = 2\n",
    )
    .unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&nested_layout(4));

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", layout_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    let result: Value = serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], true);
    assert_eq!(result["warnings"][0]["kind"], "depth_exceeded");
}

#[test]
fn test_validate_missing_file() {
    let config_dir = TempDir::new().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["validate", "--layout", "/nonexistent/layout.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "Missing file should exit with code 2");
}
