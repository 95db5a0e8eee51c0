//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tripdeck::models::{LayoutConfig, Payload};

/// Paris itinerary touching most section types.
///
/// Sections, in order: header, cards (with a content action), timeline,
/// members-only list, map, footer. One floating and one bottom action.
pub fn paris_trip() -> LayoutConfig {
    serde_json::from_value(json!({
        "mode": "itinerary",
        "title": "Paris in June",
        "description": "Five days of museums and cafés",
        "sections": [
            {"id": "hdr", "type": "header", "title": "Paris", "subtitle": "June 3 - June 7"},
            {
                "id": "sights",
                "type": "cards",
                "title": "Must see",
                "columns": 2,
                "content": {"items": [
                    {
                        "id": "louvre",
                        "title": "Louvre",
                        "subtitle": "Museum",
                        "badge": "Top pick",
                        "actions": [{
                            "id": "book-louvre",
                            "label": "Book",
                            "type": "primary",
                            "action": "book",
                            "payload": {"venue": "louvre"}
                        }]
                    },
                    {"id": "orsay", "title": "Musée d'Orsay"}
                ]}
            },
            {
                "id": "plan",
                "type": "timeline",
                "title": "Day 1",
                "content": {"items": [
                    {"id": "arrive", "title": "Arrive at CDG", "metadata": {"time": "09:00"}},
                    {"id": "lunch", "title": "Lunch in Le Marais", "metadata": {"time": "13:00"}}
                ]}
            },
            {
                "id": "bookings",
                "type": "list",
                "title": "My bookings",
                "visibility": {"condition": "authenticated"},
                "content": {"items": [{"id": "hotel", "title": "Hotel du Louvre"}]}
            },
            {
                "id": "where",
                "type": "map",
                "title": "Where",
                "content": {"items": [
                    {"id": "eiffel", "title": "Eiffel Tower", "metadata": {"lat": 48.8584, "lng": 2.2945}}
                ]}
            },
            {
                "id": "foot",
                "type": "footer",
                "content": {"items": [{"id": "help", "title": "Help", "metadata": {"href": "/help"}}]}
            }
        ],
        "actions": [
            {"id": "share", "label": "Share trip", "type": "primary", "action": "share", "position": "floating"},
            {"id": "print", "label": "Print", "action": "print", "position": "bottom"}
        ],
        "itinerarySettings": {"groupByDay": true}
    }))
    .unwrap()
}

/// Layout with a section type outside the closed set.
pub fn layout_with_unknown_type() -> LayoutConfig {
    serde_json::from_value(json!({
        "title": "Odd",
        "sections": [
            {"id": "a", "type": "header", "title": "Top"},
            {"id": "b", "type": "holo-deck"},
            {"id": "c", "type": "footer"}
        ]
    }))
    .unwrap()
}

/// Layout whose sibling sections share an id.
pub fn layout_with_duplicate_ids() -> LayoutConfig {
    serde_json::from_value(json!({
        "title": "Dupes",
        "sections": [
            {"id": "same", "type": "list"},
            {"id": "same", "type": "cards"}
        ]
    }))
    .unwrap()
}

/// A chain of `levels` sections, each the only child of the previous.
pub fn nested_layout(levels: usize) -> LayoutConfig {
    let mut section = json!({"id": format!("level-{levels}"), "type": "list"});
    for level in (1..levels).rev() {
        section = json!({
            "id": format!("level-{level}"),
            "type": "list",
            "children": [section]
        });
    }
    serde_json::from_value(json!({"title": "Deep", "sections": [section]})).unwrap()
}

/// Calendar layout with dated, undated and out-of-order items.
pub fn calendar_layout() -> LayoutConfig {
    serde_json::from_value(json!({
        "mode": "calendar",
        "title": "June",
        "sections": [{
            "id": "cal",
            "type": "calendar",
            "title": "Schedule",
            "content": {"items": [
                {"id": "b", "title": "Versailles", "metadata": {"date": "2025-06-05"}},
                {"id": "a", "title": "Louvre", "metadata": {"date": "2025-06-03T10:00:00Z"}},
                {"id": "c", "title": "Someday picnic"}
            ]}
        }],
        "calendarSettings": {"defaultView": "week", "showWeather": true}
    }))
    .unwrap()
}

/// Data bag with weather, alerts and a map center.
pub fn sample_data() -> Payload {
    let value = json!({
        "weather": {"2025-06-03": "Sunny, 24°C", "2025-06-05": {"summary": "Showers"}},
        "alerts": [{"title": "Metro strike", "severity": "warning"}],
        "center": {"lat": 48.8566, "lng": 2.3522}
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Writes a layout to `name` inside `dir`.
pub fn write_layout_file(dir: &Path, name: &str, layout: &LayoutConfig) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(layout).unwrap()).unwrap();
    path
}

/// Writes a layout to a fresh temp dir; keep the `TempDir` alive while using the path.
pub fn create_temp_layout_file(layout: &LayoutConfig) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_layout_file(temp_dir.path(), "layout.json", layout);
    (path, temp_dir)
}

/// Writes raw text (e.g. JSON5 or broken JSON) to a temp file.
pub fn create_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    (path, temp_dir)
}

/// Writes the sample data bag next to a layout.
pub fn write_data_file(dir: &Path) -> PathBuf {
    let path = dir.join("data.json");
    fs::write(&path, serde_json::to_string(&sample_data()).unwrap()).unwrap();
    path
}

/// A `tripdeck` command isolated from the user's real configuration.
pub fn tripdeck(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tripdeck"));
    cmd.env("TRIPDECK_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd
}
