//! Section-level data structures: the closed section type set and its
//! rendering hints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::content::SectionContent;
use crate::models::lenient;

/// Default grid column count when a section does not specify one.
pub const DEFAULT_COLUMNS: u16 = 3;

/// The closed set of section types a layout can declare.
///
/// Anything outside the set is kept verbatim in [`SectionType::Unknown`] so the
/// renderer can show a placeholder naming it instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    /// Page header with title and subtitle
    Header,
    /// Large banner with an image and call-to-action
    Hero,
    /// Grid of content cards
    Cards,
    /// Vertical list of rows
    List,
    /// Ordered timeline of entries
    Timeline,
    /// Items grouped by calendar day
    Calendar,
    /// Located items as map markers
    Map,
    /// Input fields with submit actions
    Form,
    /// Image grid
    Gallery,
    /// Grid of numeric tiles
    Stats,
    /// Safety and weather alerts
    Alerts,
    /// Suggested items with reasons
    Recommendations,
    /// Page footer links
    Footer,
    /// Unrecognized type string, rendered as a placeholder
    Unknown(String),
}

impl SectionType {
    /// Every concrete (known) section type, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Header,
        Self::Hero,
        Self::Cards,
        Self::List,
        Self::Timeline,
        Self::Calendar,
        Self::Map,
        Self::Form,
        Self::Gallery,
        Self::Stats,
        Self::Alerts,
        Self::Recommendations,
        Self::Footer,
    ];

    /// Returns the wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "header",
            Self::Hero => "hero",
            Self::Cards => "cards",
            Self::List => "list",
            Self::Timeline => "timeline",
            Self::Calendar => "calendar",
            Self::Map => "map",
            Self::Form => "form",
            Self::Gallery => "gallery",
            Self::Stats => "stats",
            Self::Alerts => "alerts",
            Self::Recommendations => "recommendations",
            Self::Footer => "footer",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns true for types outside the closed set.
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Types that lay their items out on a column grid.
    pub const fn is_grid_family(&self) -> bool {
        matches!(
            self,
            Self::Cards | Self::Gallery | Self::Stats | Self::Recommendations
        )
    }

    /// Types that render their own title, so the dispatcher must not.
    pub const fn renders_own_title(&self) -> bool {
        matches!(self, Self::Header | Self::Hero)
    }
}

impl From<String> for SectionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "header" => Self::Header,
            "hero" => Self::Hero,
            "cards" => Self::Cards,
            "list" => Self::List,
            "timeline" => Self::Timeline,
            "calendar" => Self::Calendar,
            "map" => Self::Map,
            "form" => Self::Form,
            "gallery" => Self::Gallery,
            "stats" => Self::Stats,
            "alerts" => Self::Alerts,
            "recommendations" => Self::Recommendations,
            "footer" => Self::Footer,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for SectionType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<SectionType> for String {
    fn from(kind: SectionType) -> Self {
        match kind {
            SectionType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for SectionType {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrangement hint, orthogonal to the section type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Column grid
    Grid,
    /// Stacked rows
    List,
    /// Horizontally scrolling strip
    Carousel,
    /// Vertical time axis
    Timeline,
    /// Geographic placement
    Map,
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "carousel" => Ok(Self::Carousel),
            "timeline" => Ok(Self::Timeline),
            "map" => Ok(Self::Map),
            other => Err(format!("unknown layout hint '{other}'")),
        }
    }
}

impl LayoutKind {
    /// Wire name of the hint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Carousel => "carousel",
            Self::Timeline => "timeline",
            Self::Map => "map",
        }
    }
}

/// Vertical padding around a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Spacing {
    /// No blank lines around the section
    Compact,
    /// One blank line after the section
    #[default]
    Normal,
    /// One blank line before and after the section
    Spacious,
}

impl From<String> for Spacing {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "compact" => Self::Compact,
            "spacious" => Self::Spacious,
            _ => Self::Normal,
        }
    }
}

impl Spacing {
    /// Wire name of the spacing.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Normal => "normal",
            Self::Spacious => "spacious",
        }
    }

    /// Blank lines emitted (before, after) the section by text output.
    pub const fn padding(self) -> (usize, usize) {
        match self {
            Self::Compact => (0, 0),
            Self::Normal => (0, 1),
            Self::Spacious => (1, 1),
        }
    }
}

/// Condition that gates whether a section renders at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum VisibilityCondition {
    /// Always rendered
    #[default]
    Always,
    /// Rendered only for signed-in viewers
    Authenticated,
    /// Rendered only for anonymous viewers
    Anonymous,
    /// Delegated to the host's rule evaluator
    Custom,
}

impl From<String> for VisibilityCondition {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "authenticated" => Self::Authenticated,
            "anonymous" => Self::Anonymous,
            "custom" => Self::Custom,
            _ => Self::Always,
        }
    }
}

/// Visibility rule attached to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    /// Which check applies
    #[serde(default, deserialize_with = "lenient::enum_or_default")]
    pub condition: VisibilityCondition,
    /// Opaque rule handed to the host when `condition` is `custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rule: Option<String>,
}

/// One renderable unit of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSection {
    /// Key unique among siblings; empty when the document omitted it
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    /// Which sub-renderer handles this section
    #[serde(rename = "type", default)]
    pub section_type: SectionType,
    /// Heading shown above the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Secondary heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Inline items or a data source descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SectionContent>,
    /// Arrangement hint
    #[serde(
        default,
        deserialize_with = "lenient::hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub layout: Option<LayoutKind>,
    /// Grid column count (grid-family types only)
    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub columns: Option<u16>,
    /// Vertical padding
    #[serde(default, deserialize_with = "lenient::enum_or_default")]
    pub spacing: Spacing,
    /// Gate evaluated before dispatch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Nested sections rendered beneath this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutSection>,
}

impl LayoutSection {
    /// Creates a section with the given id and type and no content.
    pub fn new(id: impl Into<String>, section_type: impl Into<SectionType>) -> Self {
        Self {
            id: id.into(),
            section_type: section_type.into(),
            ..Self::default()
        }
    }

    /// Column count, falling back to [`DEFAULT_COLUMNS`] when unset or zero.
    pub fn columns_or_default(&self) -> u16 {
        self.columns.filter(|c| *c > 0).unwrap_or(DEFAULT_COLUMNS)
    }

    /// Items of the inline content, empty when absent.
    pub fn items(&self) -> &[crate::models::ContentItem] {
        self.content
            .as_ref()
            .map_or(&[], |content| content.items.as_slice())
    }

    /// Depth of the subtree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Number of sections in the subtree rooted here, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}
