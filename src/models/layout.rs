//! Root layout document and per-mode settings.

use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::fmt;
use std::str::FromStr;

use crate::models::content::{LayoutAction, Payload};
use crate::models::section::LayoutSection;

/// Operating mode of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Month/week/day planner
    Calendar,
    /// Destination guide
    Guide,
    /// Day-by-day trip plan
    #[default]
    Itinerary,
    /// Reservations and tickets
    Booking,
}

impl LayoutMode {
    /// All modes in display order.
    pub const ALL: [Self; 4] = [Self::Calendar, Self::Guide, Self::Itinerary, Self::Booking];

    /// Wire name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Guide => "guide",
            Self::Itinerary => "itinerary",
            Self::Booking => "booking",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "calendar" => Ok(Self::Calendar),
            "guide" => Ok(Self::Guide),
            "itinerary" => Ok(Self::Itinerary),
            "booking" => Ok(Self::Booking),
            other => anyhow::bail!(
                "Unknown mode '{other}' (expected calendar, guide, itinerary or booking)"
            ),
        }
    }
}

/// Calendar view granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    /// Whole month
    #[default]
    Month,
    /// Seven days
    Week,
    /// Single day
    Day,
}

/// Settings accompanying a `calendar` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSettings {
    /// Initial view
    pub default_view: CalendarView,
    /// Annotate days with weather from the data bag
    pub show_weather: bool,
    /// Show alert sections
    pub show_alerts: bool,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            default_view: CalendarView::Month,
            show_weather: true,
            show_alerts: true,
        }
    }
}

/// Settings accompanying a `guide` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideSettings {
    /// Categories the guide is filtered to (empty = all)
    pub categories: Vec<String>,
    /// Show map sections
    pub show_map: bool,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            show_map: true,
        }
    }
}

/// Settings accompanying an `itinerary` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItinerarySettings {
    /// Group timeline entries under day headings
    pub group_by_day: bool,
    /// Show travel time between consecutive activities
    pub show_travel_times: bool,
}

impl Default for ItinerarySettings {
    fn default() -> Self {
        Self {
            group_by_day: true,
            show_travel_times: false,
        }
    }
}

/// Settings accompanying a `booking` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingSettings {
    /// ISO 4217 currency code for prices
    pub currency: String,
    /// Show prices on booking cards
    pub show_prices: bool,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            show_prices: true,
        }
    }
}

/// Borrowed view of whichever settings object matches the layout's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSettings<'a> {
    /// Calendar settings
    Calendar(&'a CalendarSettings),
    /// Guide settings
    Guide(&'a GuideSettings),
    /// Itinerary settings
    Itinerary(&'a ItinerarySettings),
    /// Booking settings
    Booking(&'a BookingSettings),
}

/// The root declarative document for one screen.
///
/// Produced wholesale by the serving side and treated as immutable by the
/// renderer; a mode switch or data change means a brand-new config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Operating mode
    #[serde(default)]
    pub mode: LayoutMode,
    /// Page title
    #[serde(default)]
    pub title: String,
    /// Page description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sections in rendering order
    #[serde(default)]
    pub sections: Vec<LayoutSection>,
    /// Page-level actions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<LayoutAction>,
    /// Opaque bag passed through unmodified
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Payload,
    /// Settings for `calendar` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_settings: Option<CalendarSettings>,
    /// Settings for `guide` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_settings: Option<GuideSettings>,
    /// Settings for `itinerary` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary_settings: Option<ItinerarySettings>,
    /// Settings for `booking` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_settings: Option<BookingSettings>,
}

impl LayoutConfig {
    /// Creates an empty layout for a mode.
    pub fn new(mode: LayoutMode, title: impl Into<String>) -> Self {
        Self {
            mode,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the settings object matching the layout's mode, if present.
    pub fn settings(&self) -> Option<ModeSettings<'_>> {
        match self.mode {
            LayoutMode::Calendar => self.calendar_settings.as_ref().map(ModeSettings::Calendar),
            LayoutMode::Guide => self.guide_settings.as_ref().map(ModeSettings::Guide),
            LayoutMode::Itinerary => self
                .itinerary_settings
                .as_ref()
                .map(ModeSettings::Itinerary),
            LayoutMode::Booking => self.booking_settings.as_ref().map(ModeSettings::Booking),
        }
    }

    /// Modes whose settings object is present but does not match `mode`.
    pub fn mismatched_settings(&self) -> Vec<LayoutMode> {
        let present = [
            (LayoutMode::Calendar, self.calendar_settings.is_some()),
            (LayoutMode::Guide, self.guide_settings.is_some()),
            (LayoutMode::Itinerary, self.itinerary_settings.is_some()),
            (LayoutMode::Booking, self.booking_settings.is_some()),
        ];
        present
            .into_iter()
            .filter(|(mode, has)| *has && *mode != self.mode)
            .map(|(mode, _)| mode)
            .collect()
    }

    /// Actions the floating action bar is responsible for, in declaration order.
    pub fn floating_actions(&self) -> impl Iterator<Item = &LayoutAction> {
        self.actions.iter().filter(|a| a.is_floating())
    }

    /// Deepest section nesting in the document (0 when there are no sections).
    pub fn depth(&self) -> usize {
        self.sections
            .iter()
            .map(LayoutSection::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of sections, counting nested children.
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(LayoutSection::subtree_len).sum()
    }
}
