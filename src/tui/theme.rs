//! Terminal color theme for rendered layouts.
//!
//! Detects the OS dark/light preference and maps render-tree roles (headings,
//! badges, button emphasis, alert severity) to terminal colors.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::models::ActionType;

/// Semantic colors used by the text backend and the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Page and section headings
    pub heading: Color,
    /// Secondary text (subtitles, descriptions)
    pub text_secondary: Color,
    /// Muted text (empty states, truncation notes, hints)
    pub text_muted: Color,
    /// Body text
    pub text: Color,
    /// Badges and reasons
    pub badge: Color,
    /// Primary buttons
    pub primary: Color,
    /// Secondary and tertiary buttons
    pub secondary: Color,
    /// Destructive buttons and critical alerts
    pub destructive: Color,
    /// Warning alerts and unknown-type placeholders
    pub warning: Color,
    /// Informational alerts and map markers
    pub info: Color,
    /// Background of the focused button in the preview
    pub focus_bg: Color,
    /// Page background
    pub background: Color,
}

impl Theme {
    /// Detects the OS theme and returns the matching palette.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Palette for the configured mode; `Auto` asks the OS.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Palette for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            heading: Color::Cyan,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            text: Color::White,
            badge: Color::Magenta,
            primary: Color::Yellow,
            secondary: Color::Gray,
            destructive: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            focus_bg: Color::DarkGray,
            background: Color::Black,
        }
    }

    /// Palette for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            heading: Color::Blue,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,
            text: Color::Black,
            badge: Color::Rgb(128, 0, 128),
            primary: Color::Rgb(180, 100, 0), // Dark orange for visibility
            secondary: Color::Rgb(60, 60, 60),
            destructive: Color::Red,
            warning: Color::Rgb(200, 100, 0),
            info: Color::Blue,
            focus_bg: Color::Rgb(230, 230, 230),
            background: Color::White,
        }
    }

    /// Style of a button with the given emphasis.
    pub fn button(&self, emphasis: ActionType) -> Style {
        match emphasis {
            ActionType::Primary => Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD),
            ActionType::Secondary => Style::default().fg(self.secondary),
            ActionType::Tertiary => Style::default()
                .fg(self.secondary)
                .add_modifier(Modifier::UNDERLINED),
            ActionType::Destructive => Style::default()
                .fg(self.destructive)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Color of an alert severity (`info`, `warning`, `critical`).
    pub fn severity(&self, severity: &str) -> Color {
        match severity {
            "critical" => self.destructive,
            "warning" => self.warning,
            _ => self.info,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes() {
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
    }

    #[test]
    fn test_contrast() {
        let dark = Theme::dark();
        assert_eq!(dark.text, Color::White);
        assert_eq!(dark.background, Color::Black);

        let light = Theme::light();
        assert_eq!(light.text, Color::Black);
        assert_eq!(light.background, Color::White);
        // Yellow is unreadable on white
        assert_ne!(light.primary, Color::Yellow);
    }

    #[test]
    fn test_button_styles_differ() {
        let theme = Theme::dark();
        assert_ne!(
            theme.button(ActionType::Primary),
            theme.button(ActionType::Destructive)
        );
        assert_eq!(theme.button(ActionType::Destructive).fg, Some(Color::Red));
    }

    #[test]
    fn test_severity_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.severity("critical"), theme.destructive);
        assert_eq!(theme.severity("warning"), theme.warning);
        assert_eq!(theme.severity("whatever"), theme.info);
    }

    #[test]
    fn test_detect_does_not_panic() {
        let theme = Theme::detect();
        assert!(theme == Theme::dark() || theme == Theme::light());
    }
}
