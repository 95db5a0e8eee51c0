//! End-to-end tests for `tripdeck config` commands.

use serde_json::Value;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let config_dir = TempDir::new().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["config", "show"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Max Depth: 8"));
    assert!(stdout.contains("Theme Mode: auto"));
    assert!(stdout.contains("(current directory)"));
}

#[test]
fn test_config_show_json_format() {
    let config_dir = TempDir::new().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["config", "show", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let config: Value = serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(config["render"]["max_depth"], 8);
    assert_eq!(config["ui"]["theme"], "auto");
    assert!(config["paths"].get("workspace").is_none());
    assert!(config["config_file"]
        .as_str()
        .unwrap()
        .ends_with("config.toml"));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists() {
    let config_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["config", "set", "--max-depth", "4", "--theme", "Dark"])
        .args(["--workspace", workspace.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_dir.path().join("config.toml").exists());

    let output = tripdeck(config_dir.path())
        .args(["config", "show", "--json"])
        .output()
        .expect("Failed to execute command");
    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["render"]["max_depth"], 4);
    assert_eq!(config["ui"]["theme"], "dark");
    assert_eq!(
        config["paths"]["workspace"],
        workspace.path().to_str().unwrap()
    );
}

#[test]
fn test_config_set_requires_an_option() {
    let config_dir = TempDir::new().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["config", "set"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one"));
}

#[test]
fn test_config_set_rejects_bad_values() {
    let config_dir = TempDir::new().unwrap();

    for args in [
        vec!["config", "set", "--max-depth", "0"],
        vec!["config", "set", "--max-depth", "65"],
        vec!["config", "set", "--theme", "sepia"],
        vec!["config", "set", "--workspace", "/nonexistent/tripdeck-layouts"],
    ] {
        let output = tripdeck(config_dir.path())
            .args(&args)
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(1), "{args:?}");
    }

    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_configured_depth_applies_to_render() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&nested_layout(3));

    let output = tripdeck(config_dir.path())
        .args(["config", "set", "--max-depth", "1"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 nested section(s) not shown"));
}
