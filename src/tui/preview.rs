//! Interactive preview of a rendered layout.
//!
//! The preview re-renders through the same [`LayoutRenderer`] the CLI and web
//! API use, draws the tree with the text backend and lets the user press the
//! rendered buttons. Pressed actions are routed through a real
//! [`ActionHandler`] and echoed in the status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::cell::RefCell;
use std::path::PathBuf;

use super::Theme;
use crate::models::{LayoutConfig, Payload};
use crate::render::text::to_lines;
use crate::render::{ActionHandler, LayoutRenderer, Node, Rendered, RenderProps, VisibilityContext};
use crate::services::LayoutService;

/// One action fired from the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredAction {
    /// Action id handed to the handler
    pub action_id: String,
    /// Payload handed to the handler
    pub payload: Option<Payload>,
}

impl FiredAction {
    fn describe(&self) -> String {
        match &self.payload {
            Some(payload) => format!(
                "{} {}",
                self.action_id,
                serde_json::Value::Object(payload.clone())
            ),
            None => self.action_id.clone(),
        }
    }
}

/// State of the preview screen.
pub struct PreviewState {
    layout: LayoutConfig,
    layout_path: Option<PathBuf>,
    data: Payload,
    renderer: LayoutRenderer,
    /// Viewer is signed in
    pub authenticated: bool,
    /// Current render tree
    pub tree: Node,
    /// Index of the focused button in render order
    pub focus: Option<usize>,
    /// First visible line
    pub scroll: usize,
    /// Actions fired so far, oldest first
    pub fired: Vec<FiredAction>,
    /// Transient status message
    pub status: Option<String>,
    /// Active color theme
    pub theme: Theme,
    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl PreviewState {
    /// Creates the preview and performs the first render.
    pub fn new(
        layout: LayoutConfig,
        data: Payload,
        renderer: LayoutRenderer,
        authenticated: bool,
        theme: Theme,
    ) -> Self {
        let mut state = Self {
            layout,
            layout_path: None,
            data,
            renderer,
            authenticated,
            tree: Node::new(crate::render::NodeKind::Page),
            focus: None,
            scroll: 0,
            fired: Vec::new(),
            status: None,
            theme,
            should_quit: false,
        };
        state.rerender();
        state
    }

    /// Remembers the file the layout came from so `r` can reload it.
    #[must_use]
    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.layout_path = Some(path);
        self
    }

    /// Number of pressable buttons in the current tree.
    pub fn button_count(&self) -> usize {
        Rendered::bind(&self.tree, None).buttons().len()
    }

    fn rerender(&mut self) {
        let props = RenderProps::new(&self.data)
            .visibility(VisibilityContext::new(self.authenticated));
        self.tree = self.renderer.render(&self.layout, &props);

        let count = self.button_count();
        self.focus = match self.focus {
            _ if count == 0 => None,
            Some(index) => Some(index.min(count - 1)),
            None => Some(0),
        };
    }

    fn reload(&mut self) {
        let Some(path) = self.layout_path.clone() else {
            self.status = Some("Layout was not loaded from a file".to_string());
            return;
        };
        match LayoutService::load(&path) {
            Ok(layout) => {
                self.layout = layout;
                self.rerender();
                self.status = Some(format!("Reloaded {}", path.display()));
            }
            Err(e) => self.status = Some(format!("Reload failed: {e:#}")),
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let count = self.button_count();
        if count == 0 {
            return;
        }
        let current = self.focus.unwrap_or(0);
        self.focus = Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        });
    }

    /// Presses the focused button; returns true when an action fired.
    pub fn press_focused(&mut self) -> bool {
        let Some(index) = self.focus else {
            return false;
        };

        let fired = RefCell::new(None);
        let handler = |action_id: &str, payload: Option<&Payload>| {
            *fired.borrow_mut() = Some(FiredAction {
                action_id: action_id.to_string(),
                payload: payload.cloned(),
            });
        };
        let handler_ref: &dyn ActionHandler = &handler;
        let pressed = Rendered::bind(&self.tree, Some(handler_ref)).press_nth(index);

        if let Some(action) = fired.into_inner() {
            tracing::debug!(action = %action.action_id, "Preview action fired");
            self.status = Some(format!("Fired: {}", action.describe()));
            self.fired.push(action);
        }
        pressed
    }

    /// Applies a key press. Returns true when the preview should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !self.press_focused() {
                    self.status = Some("No button to press".to_string());
                }
            }
            KeyCode::Char('a') => {
                self.authenticated = !self.authenticated;
                self.rerender();
                self.status = Some(if self.authenticated {
                    "Viewing as signed-in user".to_string()
                } else {
                    "Viewing as guest".to_string()
                });
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        self.should_quit
    }
}

/// Index of the line holding the focused button.
fn focused_line(lines: &[Line<'_>], theme: &Theme) -> Option<usize> {
    lines.iter().position(|line| {
        line.spans
            .iter()
            .any(|span| span.style.bg == Some(theme.focus_bg))
    })
}

/// Draws the preview and keeps the focused button on screen.
pub fn render(f: &mut Frame, state: &mut PreviewState) {
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(5),    // Rendered layout
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], state);
    render_body(f, chunks[1], state);
    render_status(f, chunks[2], state);
}

fn render_title(f: &mut Frame, area: Rect, state: &PreviewState) {
    let theme = &state.theme;
    let viewer = if state.authenticated { "signed in" } else { "guest" };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", state.layout.title),
            Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", state.layout.mode),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(format!("viewer: {viewer}"), Style::default().fg(theme.text_muted)),
    ]);
    let widget = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.text_muted)),
    );
    f.render_widget(widget, area);
}

fn render_body(f: &mut Frame, area: Rect, state: &mut PreviewState) {
    let lines = to_lines(&state.tree, &state.theme, state.focus);
    let visible = usize::from(area.height.saturating_sub(2)).max(1);

    if let Some(line) = focused_line(&lines, &state.theme) {
        if line < state.scroll {
            state.scroll = line;
        } else if line >= state.scroll + visible {
            state.scroll = line + 1 - visible;
        }
    }
    state.scroll = state.scroll.min(lines.len().saturating_sub(1));

    let offset = u16::try_from(state.scroll).unwrap_or(u16::MAX);
    let widget = Paragraph::new(lines)
        .scroll((offset, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(state.theme.text_muted)),
        );
    f.render_widget(widget, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &PreviewState) {
    let theme = &state.theme;
    let line = match &state.status {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.primary),
        )),
        None => Line::from(Span::styled(
            "Tab: next button  Enter: press  a: toggle sign-in  r: reload  q: quit",
            Style::default().fg(theme.text_muted),
        )),
    };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} actions fired ", state.fired.len()))
            .border_style(Style::default().fg(theme.text_muted)),
    );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn state() -> PreviewState {
        let layout: LayoutConfig = serde_json::from_value(json!({
            "mode": "itinerary",
            "title": "Paris Trip",
            "sections": [
                {"id": "s1", "type": "cards", "content": {"items": [
                    {"id": "i1", "title": "Eiffel Tower", "actions": [
                        {"id": "details", "label": "Details", "action": "open", "payload": {"id": "i1"}}
                    ]}
                ]}},
                {"id": "members", "type": "list", "visibility": {"condition": "authenticated"},
                 "content": {"items": [{"id": "m", "title": "Members only", "actions": [
                    {"id": "vip", "label": "VIP", "action": "vip"}
                 ]}]}}
            ],
            "actions": [{"id": "save", "label": "Save", "action": "save_trip", "position": "floating",
                         "payload": {"tripId": "paris-2025"}}]
        }))
        .unwrap();
        PreviewState::new(layout, Payload::new(), LayoutRenderer::default(), false, Theme::dark())
    }

    #[test]
    fn test_initial_focus() {
        let state = state();
        assert_eq!(state.button_count(), 2);
        assert_eq!(state.focus, Some(0));
    }

    #[test]
    fn test_tab_cycles_and_enter_fires() {
        let mut state = state();
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus, Some(1));
        state.handle_key(key(KeyCode::Enter));

        assert_eq!(state.fired.len(), 1);
        assert_eq!(state.fired[0].action_id, "save");
        assert_eq!(state.fired[0].payload.as_ref().unwrap()["tripId"], "paris-2025");
        assert!(state.status.as_deref().unwrap().contains("save"));

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus, Some(0));
        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.focus, Some(1));
    }

    #[test]
    fn test_toggle_auth_rerenders() {
        let mut state = state();
        assert!(!state.tree.contains_text("Members only"));
        state.handle_key(key(KeyCode::Char('a')));
        assert!(state.authenticated);
        assert!(state.tree.contains_text("Members only"));
        assert_eq!(state.button_count(), 3);
    }

    #[test]
    fn test_reload_without_source() {
        let mut state = state();
        state.handle_key(key(KeyCode::Char('r')));
        assert!(state.status.as_deref().unwrap().contains("not loaded"));
    }

    #[test]
    fn test_reload_from_source_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(&path, r#"{"title": "Rome", "sections": [{"id": "s", "type": "list"}]}"#)
            .unwrap();

        let mut state = state().with_source(path.clone());
        state.handle_key(key(KeyCode::Char('r')));
        assert_eq!(state.layout.title, "Rome");
        assert!(state.tree.contains_text("Rome"));
        assert!(state.status.as_deref().unwrap().contains("Reloaded"));

        std::fs::write(&path, "{").unwrap();
        state.handle_key(key(KeyCode::Char('r')));
        assert!(state.status.as_deref().unwrap().contains("Reload failed"));
        assert_eq!(state.layout.title, "Rome");
    }

    #[test]
    fn test_quit() {
        let mut state = state();
        assert!(!state.handle_key(key(KeyCode::Down)));
        assert_eq!(state.scroll, 1);
        assert!(state.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_draws_into_test_backend() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut state = state();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render(f, &mut state)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Paris Trip"));
        assert!(text.contains("Eiffel Tower"));
    }
}
