//! End-to-end tests for `tripdeck render` command.

use serde_json::Value;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_render_text_output() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, temp_dir) = create_temp_layout_file(&paris_trip());
    let data_path = write_data_file(temp_dir.path());

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .args(["--data", data_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Paris in June"));
    assert!(stdout.contains("Louvre"));
    assert!(stdout.contains("[Share trip]"));
    assert!(stdout.contains("48.8566, 2.3522"));
    assert!(!stdout.contains("My bookings"), "members-only section shown");
}

#[test]
fn test_render_auth_shows_members_section() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&paris_trip());

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap(), "--auth"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("My bookings"));
}

#[test]
fn test_render_json_tree() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&paris_trip());

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let tree: Value = serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(tree["kind"], "page");
    assert_eq!(tree["text"], "Paris in June");
    let last = tree["children"].as_array().unwrap().last().unwrap();
    assert_eq!(last["kind"], "action_bar");
}

#[test]
fn test_render_loading_and_error_states() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&paris_trip());
    let layout = layout_path.to_str().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout, "--loading", "--error", "boom"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Loading...");

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout, "--error", "Trip service unavailable"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Trip service unavailable"));
    assert!(!stdout.contains("Louvre"));
}

#[test]
fn test_render_unknown_type_placeholder() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&layout_with_unknown_type());

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("holo-deck"));
}

#[test]
fn test_render_max_depth_override() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&nested_layout(4));

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .args(["--max-depth", "2", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"truncated\""));
    assert!(stdout.contains("2 nested section(s) not shown"));
}

#[test]
fn test_render_allow_rule() {
    let config_dir = TempDir::new().unwrap();
    let layout = serde_json::from_value(serde_json::json!({
        "title": "Rules",
        "sections": [
            {"id": "a", "type": "list", "title": "Shared trip",
             "visibility": {"condition": "custom", "customRule": "trip.shared"}},
            {"id": "b", "type": "list", "title": "Premium perks",
             "visibility": {"condition": "custom", "customRule": "premium"}}
        ]
    }))
    .unwrap();
    let (layout_path, _temp_dir) = create_temp_layout_file(&layout);

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .args(["--allow-rule", "premium"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Premium perks"));
    assert!(!stdout.contains("Shared trip"));
}

#[test]
fn test_render_json5_layout() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_file(
        "trip.json5",
        "{\n  // comments are allowed\n  title: 'Lisbon',\n  sections: [{id: 'h', type: 'header', title: 'Hello'},],\n}\n",
    );

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("HELLO"));
}

#[test]
fn test_render_missing_file() {
    let config_dir = TempDir::new().unwrap();

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", "/nonexistent/trip.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load layout"));
}

#[test]
fn test_render_malformed_json() {
    let config_dir = TempDir::new().unwrap();
    let (layout_path, _temp_dir) = create_temp_file("broken.json", "{\"title\": ");

    let output = tripdeck(config_dir.path())
        .args(["render", "--layout", layout_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
