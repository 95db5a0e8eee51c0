//! Concrete sub-renderers, one per section type.
//!
//! Every function here is infallible: missing fields fall back to defaults and
//! empty input produces an empty-state node.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{ContentItem, Payload};
use crate::render::actions::button_row;
use crate::render::node::{Node, NodeKind};
use crate::render::visibility::VisibilityContext;

/// Label of the calendar group holding items without a usable date.
pub const UNSCHEDULED_LABEL: &str = "Unscheduled";

/// Key of an item: its id, or a positional key when the id is empty.
fn item_key(item: &ContentItem, index: usize) -> String {
    if item.id.is_empty() {
        format!("item-{index}")
    } else {
        item.id.clone()
    }
}

fn empty_state(message: &str) -> Node {
    Node::text_node(NodeKind::EmptyState, message)
}

fn role_text(role: &str, text: &str) -> Node {
    Node::text_node(NodeKind::Text, text).with_prop("role", role)
}

/// Subtitle/description/image/badge children shared by cards, rows and entries.
fn item_details(item: &ContentItem) -> Vec<Node> {
    let mut details = Vec::new();
    if let Some(subtitle) = &item.subtitle {
        details.push(role_text("subtitle", subtitle));
    }
    if let Some(description) = &item.description {
        details.push(role_text("description", description));
    }
    if let Some(image) = &item.image {
        details.push(Node::new(NodeKind::Image).with_prop("src", image.clone()));
    }
    details
}

fn item_node(
    kind: NodeKind,
    item: &ContentItem,
    index: usize,
    visibility: &VisibilityContext<'_>,
) -> Node {
    Node::text_node(kind, item.title.clone())
        .with_key(item_key(item, index))
        .with_opt_prop("icon", item.icon.clone())
        .with_opt_prop("badge", item.badge.clone())
        .with_children(item_details(item))
        .with_opt_child(button_row(&item.actions, visibility))
}

fn grid(columns: u16, cells: Vec<Node>) -> Node {
    Node::new(NodeKind::Grid)
        .with_prop("columns", columns.to_string())
        .with_children(cells)
}

/// Header section: owns its title.
pub fn header(title: Option<&str>, subtitle: Option<&str>, items: &[ContentItem]) -> Node {
    let lead = items.first();
    Node::text_node(NodeKind::Header, title.unwrap_or("Untitled"))
        .with_opt_prop("badge", lead.and_then(|item| item.badge.clone()))
        .with_opt_prop("icon", lead.and_then(|item| item.icon.clone()))
        .with_opt_child(subtitle.map(|text| role_text("subtitle", text)))
}

/// Hero banner: owns its title, shows the first item's image and actions.
pub fn hero(
    title: Option<&str>,
    subtitle: Option<&str>,
    items: &[ContentItem],
    data: &Payload,
    visibility: &VisibilityContext<'_>,
) -> Node {
    let lead = items.first();
    let title = title
        .or_else(|| lead.map(|item| item.title.as_str()))
        .or_else(|| data.get("title").and_then(Value::as_str))
        .unwrap_or("Untitled");

    Node::text_node(NodeKind::Hero, title)
        .with_opt_child(subtitle.map(|text| role_text("subtitle", text)))
        .with_opt_child(
            lead.and_then(|item| item.image.clone())
                .map(|src| Node::new(NodeKind::Image).with_prop("src", src)),
        )
        .with_opt_child(lead.and_then(|item| button_row(&item.actions, visibility)))
}

/// Card grid.
pub fn cards(items: &[ContentItem], columns: u16, visibility: &VisibilityContext<'_>) -> Node {
    if items.is_empty() {
        return grid(columns, vec![empty_state("No items")]);
    }
    let cells = items
        .iter()
        .enumerate()
        .map(|(i, item)| item_node(NodeKind::Card, item, i, visibility))
        .collect();
    grid(columns, cells)
}

/// Vertical list.
pub fn list(items: &[ContentItem], visibility: &VisibilityContext<'_>) -> Node {
    if items.is_empty() {
        return Node::new(NodeKind::List).with_child(empty_state("No items"));
    }
    Node::new(NodeKind::List).with_children(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| item_node(NodeKind::Row, item, i, visibility)),
    )
}

/// Timeline entries in the order given, labelled with their time or date.
pub fn timeline(items: &[ContentItem], visibility: &VisibilityContext<'_>) -> Node {
    if items.is_empty() {
        return Node::new(NodeKind::Timeline).with_child(empty_state("Nothing planned yet"));
    }
    Node::new(NodeKind::Timeline).with_children(items.iter().enumerate().map(|(i, item)| {
        let when = match (item.meta_str("date"), item.meta_str("time")) {
            (Some(date), Some(time)) => Some(format!("{date} {time}")),
            (date, time) => time.or(date),
        };
        item_node(NodeKind::Entry, item, i, visibility).with_opt_prop("when", when)
    }))
}

/// Parses the leading `YYYY-MM-DD` of a date or datetime string.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Weather summary for a day from `data.weather`, keyed by ISO date.
fn weather_for(data: &Payload, day: NaiveDate) -> Option<String> {
    let entry = data.get("weather")?.get(day.format("%Y-%m-%d").to_string())?;
    match entry {
        Value::String(summary) => Some(summary.clone()),
        Value::Object(fields) => fields
            .get("summary")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

/// Items grouped by `metadata.date`, days ascending, undated items last.
pub fn calendar(
    title: Option<&str>,
    items: &[ContentItem],
    data: &Payload,
    visibility: &VisibilityContext<'_>,
) -> Node {
    let mut days: BTreeMap<NaiveDate, Vec<Node>> = BTreeMap::new();
    let mut unscheduled = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let node = item_node(NodeKind::Entry, item, i, visibility)
            .with_opt_prop("time", item.meta_str("time"));
        match item.meta_str("date").as_deref().and_then(parse_day) {
            Some(day) => days.entry(day).or_default().push(node),
            None => unscheduled.push(node),
        }
    }

    let mut calendar = Node::new(NodeKind::Calendar).with_opt_prop("label", title);
    if days.is_empty() && unscheduled.is_empty() {
        return calendar.with_child(empty_state("No scheduled activities"));
    }

    for (day, entries) in days {
        let key = day.format("%Y-%m-%d").to_string();
        let label = day.format("%a, %b %-d %Y").to_string();
        calendar = calendar.with_child(
            Node::text_node(NodeKind::Day, label)
                .with_key(key)
                .with_opt_prop("weather", weather_for(data, day))
                .with_children(entries),
        );
    }

    if !unscheduled.is_empty() {
        calendar = calendar.with_child(
            Node::text_node(NodeKind::Day, UNSCHEDULED_LABEL)
                .with_key("unscheduled")
                .with_children(unscheduled),
        );
    }

    calendar
}

/// Map markers for items with `metadata.lat` / `metadata.lng`.
pub fn map(
    title: Option<&str>,
    items: &[ContentItem],
    data: &Payload,
    visibility: &VisibilityContext<'_>,
) -> Node {
    let center = data.get("center").and_then(|center| {
        let lat = center.get("lat")?.as_f64()?;
        let lng = center.get("lng")?.as_f64()?;
        Some(format!("{lat:.4}, {lng:.4}"))
    });

    let mut map = Node::new(NodeKind::Map)
        .with_opt_prop("label", title)
        .with_opt_prop("center", center);

    if items.is_empty() {
        return map.with_child(empty_state("No locations"));
    }

    let mut unplaced = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match (item.meta_f64("lat"), item.meta_f64("lng")) {
            (Some(lat), Some(lng)) => {
                map = map.with_child(
                    Node::text_node(NodeKind::Marker, item.title.clone())
                        .with_key(item_key(item, i))
                        .with_prop("lat", format!("{lat:.4}"))
                        .with_prop("lng", format!("{lng:.4}"))
                        .with_opt_child(button_row(&item.actions, visibility)),
                );
            }
            _ => unplaced.push(item.title.clone()),
        }
    }

    if !unplaced.is_empty() {
        map = map.with_child(role_text("unplaced", &unplaced.join(", ")));
    }
    map
}

/// One input field per item, followed by the item's buttons.
pub fn form(items: &[ContentItem], visibility: &VisibilityContext<'_>) -> Node {
    if items.is_empty() {
        return Node::new(NodeKind::Form).with_child(empty_state("No fields"));
    }
    Node::new(NodeKind::Form).with_children(items.iter().enumerate().map(|(i, item)| {
        let required = item
            .metadata
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Node::text_node(NodeKind::Field, item.title.clone())
            .with_key(item_key(item, i))
            .with_prop("input", item.meta_str("input").unwrap_or_else(|| "text".to_string()))
            .with_opt_prop("hint", item.description.clone())
            .with_opt_prop("value", item.meta_str("value"))
            .with_prop("required", required.to_string())
            .with_opt_child(button_row(&item.actions, visibility))
    }))
}

/// Image grid; items without an image show their title instead.
pub fn gallery(items: &[ContentItem], columns: u16, visibility: &VisibilityContext<'_>) -> Node {
    if items.is_empty() {
        return grid(columns, vec![empty_state("No photos")]);
    }
    let cells = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let cell = match &item.image {
                Some(src) => Node::text_node(NodeKind::Image, item.title.clone())
                    .with_prop("src", src.clone()),
                None => Node::text_node(NodeKind::Text, item.title.clone()),
            };
            cell.with_key(item_key(item, i))
                .with_opt_child(button_row(&item.actions, visibility))
        })
        .collect();
    grid(columns, cells)
}

/// Stat tiles; the value comes from `metadata.value`, else the badge.
pub fn stats(items: &[ContentItem], columns: u16, visibility: &VisibilityContext<'_>) -> Node {
    if items.is_empty() {
        return grid(columns, vec![empty_state("No stats")]);
    }
    let cells = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let value = item
                .meta_str("value")
                .or_else(|| item.badge.clone())
                .unwrap_or_else(|| "-".to_string());
            Node::text_node(NodeKind::Stat, item.title.clone())
                .with_key(item_key(item, i))
                .with_prop("value", value)
                .with_opt_prop("icon", item.icon.clone())
                .with_opt_child(button_row(&item.actions, visibility))
        })
        .collect();
    grid(columns, cells)
}

fn severity_of(raw: Option<&str>) -> &'static str {
    match raw {
        Some("critical") => "critical",
        Some("warning") => "warning",
        _ => "info",
    }
}

/// Alerts from items, or from `data.alerts` when the section has no items.
pub fn alerts(items: &[ContentItem], data: &Payload, visibility: &VisibilityContext<'_>) -> Node {
    let mut container = Node::new(NodeKind::Alerts);

    if items.is_empty() {
        let fallback: Vec<Node> = data
            .get("alerts")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .filter_map(|(i, entry)| {
                        let title = entry.get("title")?.as_str()?;
                        let severity = severity_of(entry.get("severity").and_then(Value::as_str));
                        Some(
                            Node::text_node(NodeKind::Alert, title)
                                .with_key(format!("alert-{i}"))
                                .with_prop("severity", severity),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        if fallback.is_empty() {
            return container.with_child(empty_state("No active alerts"));
        }
        return container.with_children(fallback);
    }

    for (i, item) in items.iter().enumerate() {
        let severity = severity_of(item.meta_str("severity").as_deref());
        container = container
            .with_child(item_node(NodeKind::Alert, item, i, visibility).with_prop("severity", severity));
    }
    container
}

/// Recommendation cards; the badge is shown as the reason.
pub fn recommendations(
    items: &[ContentItem],
    columns: u16,
    visibility: &VisibilityContext<'_>,
) -> Node {
    if items.is_empty() {
        return grid(columns, vec![empty_state("No recommendations right now")]);
    }
    let cells = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item_node(NodeKind::Card, item, i, visibility)
                .with_opt_prop("reason", item.badge.clone())
        })
        .collect();
    grid(columns, cells)
}

/// Footer links.
pub fn footer(items: &[ContentItem], visibility: &VisibilityContext<'_>) -> Node {
    Node::new(NodeKind::Footer).with_children(items.iter().enumerate().map(|(i, item)| {
        let href = item.meta_str("href").or_else(|| item.meta_str("url"));
        Node::text_node(NodeKind::Link, item.title.clone())
            .with_key(item_key(item, i))
            .with_opt_prop("href", href)
            .with_opt_child(button_row(&item.actions, visibility))
    }))
}

/// Fallback for a type outside the closed set.
pub fn placeholder(raw_type: &str) -> Node {
    Node::text_node(
        NodeKind::Placeholder,
        format!("Unsupported section type: {raw_type}"),
    )
    .with_prop("type", raw_type)
}
