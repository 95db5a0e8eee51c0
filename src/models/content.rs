//! Content items, actions and data source descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::lenient;

/// Opaque key-value bag forwarded verbatim (metadata, payloads, params).
pub type Payload = Map<String, Value>;

/// Visual emphasis of a button.
///
/// Layout actions only use the first three; `destructive` is reserved for
/// content actions but is accepted everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActionType {
    /// Main call to action
    Primary,
    /// Ordinary button
    #[default]
    Secondary,
    /// Low-emphasis link-style button
    Tertiary,
    /// Irreversible operation (delete, cancel booking)
    Destructive,
}

impl From<String> for ActionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "primary" => Self::Primary,
            "tertiary" => Self::Tertiary,
            "destructive" => Self::Destructive,
            _ => Self::Secondary,
        }
    }
}

impl ActionType {
    /// Wire name of the emphasis.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Destructive => "destructive",
        }
    }
}

/// Where a layout action is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActionPosition {
    /// Page top bar (placed by the host page)
    Top,
    /// Page bottom bar (placed by the host page)
    #[default]
    Bottom,
    /// Floating action bar rendered by the layout renderer
    Floating,
}

impl From<String> for ActionPosition {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "top" => Self::Top,
            "floating" => Self::Floating,
            _ => Self::Bottom,
        }
    }
}

impl ActionPosition {
    /// Wire name of the position.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Floating => "floating",
        }
    }
}

/// A button attached to a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentAction {
    /// Identifier passed to the action handler
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Button text
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,
    /// Visual emphasis
    #[serde(rename = "type", default, deserialize_with = "lenient::enum_or_default")]
    pub action_type: ActionType,
    /// Command identifier interpreted by the host
    #[serde(default, deserialize_with = "lenient::string")]
    pub action: String,
    /// Forwarded verbatim when the action fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    /// Opaque predicate evaluated by the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// A page-level button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAction {
    /// Identifier passed to the action handler
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Button text
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,
    /// Visual emphasis
    #[serde(rename = "type", default, deserialize_with = "lenient::enum_or_default")]
    pub action_type: ActionType,
    /// Command identifier interpreted by the host
    #[serde(default, deserialize_with = "lenient::string")]
    pub action: String,
    /// Forwarded verbatim when the action fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    /// Placement on the page
    #[serde(default, deserialize_with = "lenient::enum_or_default")]
    pub position: ActionPosition,
}

impl LayoutAction {
    /// Returns true when the renderer's action bar is responsible for this action.
    pub fn is_floating(&self) -> bool {
        self.position == ActionPosition::Floating
    }
}

/// One record rendered inside a section (card, row, timeline entry, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Key unique within the section
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Main text
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// Secondary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Short label (e.g. "Booked", "2h")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Opaque per-item data (dates, coordinates, severity, ...)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Payload,
    /// Buttons attached to the item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ContentAction>,
}

impl ContentItem {
    /// Creates an item with only an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns a metadata value as display text, if it is a string or number.
    pub fn meta_str(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns a metadata value as a float, accepting numbers and numeric strings.
    pub fn meta_f64(&self, key: &str) -> Option<f64> {
        match self.metadata.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Where a data source lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    /// Remote procedure or HTTP endpoint
    #[default]
    Api,
    /// Client-side storage
    Local,
    /// Derived from other data
    Computed,
}

/// Cache hints for a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Time to live in seconds
    pub ttl: u64,
    /// Cache key
    pub key: String,
}

/// Descriptor of where a section's items come from when not inlined.
///
/// The renderer never resolves these; a collaborator turns them into items
/// before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    /// Source kind
    #[serde(rename = "type", default)]
    pub source_type: DataSourceType,
    /// Endpoint or procedure name
    #[serde(default)]
    pub endpoint: String,
    /// HTTP method or procedure kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Call parameters
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Payload,
    /// Name of a transform applied to the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    /// Cache hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSettings>,
}

/// A section's content: inline items and/or a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SectionContent {
    /// Already-resolved items
    #[serde(default)]
    pub items: Vec<ContentItem>,
    /// Unresolved descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

impl SectionContent {
    /// Content holding the given items.
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            data_source: None,
        }
    }
}
