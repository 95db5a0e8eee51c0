//! Data models for layout documents, sections, content items and actions.
//!
//! These types mirror the JSON documents served to the renderer and are
//! independent of any output backend.

pub mod content;
pub mod layout;
mod lenient;
pub mod section;

// Re-export all model types
pub use content::{
    ActionPosition, ActionType, CacheSettings, ContentAction, ContentItem, DataSource,
    DataSourceType, LayoutAction, Payload, SectionContent,
};
pub use layout::{
    BookingSettings, CalendarSettings, CalendarView, GuideSettings, ItinerarySettings,
    LayoutConfig, LayoutMode, ModeSettings,
};
pub use section::{
    LayoutKind, LayoutSection, SectionType, Spacing, Visibility, VisibilityCondition,
    DEFAULT_COLUMNS,
};
