//! Text backend: turns a render tree into styled terminal lines.
//!
//! Used by `tripdeck render`, the `/api/render/text` endpoint and the preview.
//! Cards are drawn with box-drawing characters:
//!
//! ```text
//! ┌ Eiffel Tower [Booked]
//! │ Champ de Mars
//! │ [Save] [Share]
//! └
//! ```
//!
//! Buttons are numbered in render order, the same order
//! [`Rendered::press_nth`](crate::render::Rendered::press_nth) uses, so a
//! focus index from the preview maps straight onto a pressable button.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{ActionType, Spacing};
use crate::render::node::{Node, NodeKind};
use crate::tui::Theme;

/// Renders a tree into styled lines; `focused` highlights the n-th button.
pub fn to_lines(root: &Node, theme: &Theme, focused: Option<usize>) -> Vec<Line<'static>> {
    let mut writer = LineWriter {
        theme,
        focused,
        next_button: 0,
        lines: Vec::new(),
    };
    writer.node(root, "");
    writer.lines
}

/// Renders a tree into unstyled strings.
pub fn to_plain(root: &Node) -> Vec<String> {
    to_lines(root, &Theme::dark(), None)
        .iter()
        .map(line_text)
        .collect()
}

/// Concatenated content of a line's spans.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

struct LineWriter<'t> {
    theme: &'t Theme,
    focused: Option<usize>,
    next_button: usize,
    lines: Vec<Line<'static>>,
}

impl LineWriter<'_> {
    fn push(&mut self, prefix: &str, mut spans: Vec<Span<'static>>) {
        if !prefix.is_empty() {
            spans.insert(0, Span::styled(prefix.to_string(), self.muted()));
        }
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self, prefix: &str) {
        self.push(prefix.trim_end(), Vec::new());
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.theme.text_muted)
    }

    fn secondary(&self) -> Style {
        Style::default().fg(self.theme.text_secondary)
    }

    fn body(&self) -> Style {
        Style::default().fg(self.theme.text)
    }

    fn bold(&self) -> Style {
        Style::default()
            .fg(self.theme.heading)
            .add_modifier(Modifier::BOLD)
    }

    fn badge(&self, node: &Node, name: &str) -> Option<Span<'static>> {
        node.prop(name)
            .map(|value| Span::styled(format!(" [{value}]"), Style::default().fg(self.theme.badge)))
    }

    fn children(&mut self, node: &Node, prefix: &str) {
        for child in &node.children {
            self.node(child, prefix);
        }
    }

    fn button_span(&mut self, node: &Node) -> Span<'static> {
        let index = self.next_button;
        self.next_button += 1;
        let emphasis = node
            .action
            .as_ref()
            .map_or(ActionType::Secondary, |binding| binding.emphasis);
        let mut style = self.theme.button(emphasis);
        if self.focused == Some(index) {
            style = style.bg(self.theme.focus_bg).add_modifier(Modifier::REVERSED);
        }
        Span::styled(format!("[{}]", node.text.as_deref().unwrap_or("?")), style)
    }

    /// Buttons of a row on one line; non-button children are skipped.
    fn button_line(&mut self, node: &Node, prefix: &str) {
        let mut spans = Vec::new();
        for child in node.children.iter().filter(|c| c.kind == NodeKind::Button) {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(self.button_span(child));
        }
        self.push(prefix, spans);
    }

    /// Title line followed by the node's children one level in.
    fn titled(&mut self, node: &Node, prefix: &str, marker: &str, style: Style) {
        let mut spans = vec![Span::styled(
            format!("{marker}{}", node.text.as_deref().unwrap_or_default()),
            style,
        )];
        spans.extend(self.badge(node, "badge"));
        spans.extend(self.badge(node, "reason"));
        self.push(prefix, spans);
        self.children(node, &format!("{prefix}  "));
    }

    fn node(&mut self, node: &Node, prefix: &str) {
        let text = node.text.clone().unwrap_or_default();
        match node.kind {
            NodeKind::Page => {
                self.push(prefix, vec![Span::styled(text, self.bold())]);
                if let Some(description) = node.prop("description") {
                    self.push(prefix, vec![Span::styled(description.to_string(), self.secondary())]);
                }
                self.blank(prefix);
                self.children(node, prefix);
            }
            NodeKind::Loading => {
                self.push(prefix, vec![Span::styled(text, self.muted())]);
            }
            NodeKind::Error => {
                let style = Style::default()
                    .fg(self.theme.destructive)
                    .add_modifier(Modifier::BOLD);
                self.push(prefix, vec![Span::styled(format!("✖ {text}"), style)]);
            }
            NodeKind::Section => {
                let spacing = Spacing::from(node.prop("spacing").unwrap_or_default().to_string());
                let (before, after) = spacing.padding();
                for _ in 0..before {
                    self.blank(prefix);
                }
                self.children(node, prefix);
                for _ in 0..after {
                    self.blank(prefix);
                }
            }
            NodeKind::Heading => {
                self.push(prefix, vec![Span::styled(text, self.bold())]);
                if let Some(subtitle) = node.prop("subtitle") {
                    self.push(prefix, vec![Span::styled(subtitle.to_string(), self.secondary())]);
                }
            }
            NodeKind::Text => {
                let (content, style) = match node.prop("role") {
                    Some("subtitle") => (text, self.secondary()),
                    Some("unplaced") => (format!("Not on map: {text}"), self.muted()),
                    _ => (text, self.body()),
                };
                self.push(prefix, vec![Span::styled(content, style)]);
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Image => {
                let label = match (node.text.as_deref(), node.prop("src")) {
                    (Some(title), Some(src)) => format!("▣ {title} ({src})"),
                    (None, Some(src)) => format!("▣ {src}"),
                    (Some(title), None) => format!("▣ {title}"),
                    (None, None) => "▣".to_string(),
                };
                self.push(prefix, vec![Span::styled(label, self.muted())]);
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Button => {
                let span = self.button_span(node);
                self.push(prefix, vec![span]);
            }
            NodeKind::ButtonRow => self.button_line(node, prefix),
            NodeKind::ActionBar => {
                self.push(prefix, vec![Span::styled("─".repeat(24), self.muted())]);
                self.button_line(node, prefix);
            }
            NodeKind::Header => {
                let mut spans = Vec::new();
                if let Some(icon) = node.prop("icon") {
                    spans.push(Span::raw(format!("{icon} ")));
                }
                spans.push(Span::styled(
                    text.to_uppercase(),
                    self.bold().add_modifier(Modifier::UNDERLINED),
                ));
                spans.extend(self.badge(node, "badge"));
                self.push(prefix, spans);
                self.children(node, prefix);
            }
            NodeKind::Hero => {
                self.push(prefix, vec![Span::styled(format!("★ {text}"), self.bold())]);
                self.children(node, prefix);
            }
            NodeKind::Card => {
                let mut spans = vec![
                    Span::styled("┌ ", self.muted()),
                    Span::styled(text, self.body().add_modifier(Modifier::BOLD)),
                ];
                spans.extend(self.badge(node, "badge"));
                spans.extend(self.badge(node, "reason"));
                self.push(prefix, spans);
                self.children(node, &format!("{prefix}│ "));
                self.push(prefix, vec![Span::styled("└", self.muted())]);
            }
            NodeKind::Stat => {
                let value = node.prop("value").unwrap_or("-").to_string();
                self.push(
                    prefix,
                    vec![
                        Span::styled(format!("{text}: "), self.secondary()),
                        Span::styled(value, self.bold()),
                    ],
                );
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Row => self.titled(node, prefix, "• ", self.body()),
            NodeKind::Entry => {
                let when = node.prop("when").or_else(|| node.prop("time"));
                let mut spans = Vec::new();
                if let Some(when) = when {
                    spans.push(Span::styled(format!("{when} "), self.secondary()));
                }
                spans.push(Span::styled(format!("○ {text}"), self.body()));
                spans.extend(self.badge(node, "badge"));
                self.push(prefix, spans);
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Day => {
                let mut spans = vec![Span::styled(format!("▸ {text}"), self.bold())];
                if let Some(weather) = node.prop("weather") {
                    spans.push(Span::styled(format!(" ({weather})"), self.secondary()));
                }
                self.push(prefix, spans);
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Marker => {
                let lat = node.prop("lat").unwrap_or_default();
                let lng = node.prop("lng").unwrap_or_default();
                self.push(
                    prefix,
                    vec![
                        Span::styled(format!("◆ {text}"), Style::default().fg(self.theme.info)),
                        Span::styled(format!(" ({lat}, {lng})"), self.muted()),
                    ],
                );
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Field => {
                let required = if node.prop("required") == Some("true") { "*" } else { "" };
                let value = node.prop("value").unwrap_or("________").to_string();
                let input = node.prop("input").unwrap_or("text");
                self.push(
                    prefix,
                    vec![
                        Span::styled(format!("{text}{required}: "), self.body()),
                        Span::styled(format!("[{value}]"), self.secondary()),
                        Span::styled(format!(" ({input})"), self.muted()),
                    ],
                );
                if let Some(hint) = node.prop("hint") {
                    self.push(&format!("{prefix}  "), vec![Span::styled(hint.to_string(), self.muted())]);
                }
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::Alert => {
                let severity = node.prop("severity").unwrap_or("info");
                let style = Style::default()
                    .fg(self.theme.severity(severity))
                    .add_modifier(Modifier::BOLD);
                let marker = format!("! {} ", severity.to_uppercase());
                self.titled(node, prefix, &marker, style);
            }
            NodeKind::Link => {
                let mut spans = vec![Span::styled(format!("→ {text}"), self.body())];
                if let Some(href) = node.prop("href") {
                    spans.push(Span::styled(format!(" <{href}>"), self.muted()));
                }
                self.push(prefix, spans);
                self.children(node, &format!("{prefix}  "));
            }
            NodeKind::EmptyState => {
                self.push(
                    prefix,
                    vec![Span::styled(text, self.muted().add_modifier(Modifier::ITALIC))],
                );
            }
            NodeKind::Placeholder => {
                let style = Style::default().fg(self.theme.warning);
                self.push(prefix, vec![Span::styled(format!("⚠ {text}"), style)]);
            }
            NodeKind::Truncated => {
                self.push(prefix, vec![Span::styled(format!("… {text}"), self.muted())]);
            }
            NodeKind::Children => self.children(node, &format!("{prefix}  ")),
            NodeKind::Map => {
                if let Some(center) = node.prop("center") {
                    self.push(prefix, vec![Span::styled(format!("center {center}"), self.muted())]);
                }
                self.children(node, prefix);
            }
            NodeKind::Grid
            | NodeKind::Calendar
            | NodeKind::List
            | NodeKind::Timeline
            | NodeKind::Form
            | NodeKind::Alerts
            | NodeKind::Footer => self.children(node, prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionType;
    use crate::render::node::ActionBinding;

    fn button(id: &str, emphasis: ActionType) -> Node {
        Node::text_node(NodeKind::Button, id).with_action(ActionBinding {
            action_id: id.to_string(),
            command: id.to_string(),
            emphasis,
            payload: None,
        })
    }

    #[test]
    fn test_card_box() {
        let card = Node::text_node(NodeKind::Card, "Eiffel Tower")
            .with_prop("badge", "Booked")
            .with_child(Node::text_node(NodeKind::Text, "Champ de Mars").with_prop("role", "subtitle"));
        let lines = to_plain(&card);
        assert_eq!(lines, vec!["┌ Eiffel Tower [Booked]", "│ Champ de Mars", "└"]);
    }

    #[test]
    fn test_button_row_single_line() {
        let row = Node::new(NodeKind::ButtonRow)
            .with_child(button("Save", ActionType::Primary))
            .with_child(button("Delete", ActionType::Destructive));
        assert_eq!(to_plain(&row), vec!["[Save] [Delete]"]);
    }

    #[test]
    fn test_focus_follows_render_order() {
        let theme = Theme::dark();
        let tree = Node::new(NodeKind::Page)
            .with_child(Node::new(NodeKind::ButtonRow).with_child(button("a", ActionType::Secondary)))
            .with_child(Node::new(NodeKind::ActionBar).with_child(button("b", ActionType::Primary)));
        let lines = to_lines(&tree, &theme, Some(1));

        let focused: Vec<_> = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.style.bg == Some(theme.focus_bg))
            .map(|span| span.content.to_string())
            .collect();
        assert_eq!(focused, vec!["[b]"]);
    }

    #[test]
    fn test_placeholder_and_truncation_visible() {
        let tree = Node::new(NodeKind::Children)
            .with_child(Node::text_node(NodeKind::Placeholder, "Unsupported section type: orb"))
            .with_child(Node::text_node(NodeKind::Truncated, "2 nested section(s) not shown"));
        let lines = to_plain(&tree);
        assert_eq!(lines[0], "  ⚠ Unsupported section type: orb");
        assert_eq!(lines[1], "  … 2 nested section(s) not shown");
    }

    #[test]
    fn test_section_spacing() {
        let section = |spacing: &str| {
            Node::new(NodeKind::Section)
                .with_prop("spacing", spacing)
                .with_child(Node::text_node(NodeKind::Heading, "Day 1"))
        };
        assert_eq!(to_plain(&section("compact")), vec!["Day 1"]);
        assert_eq!(to_plain(&section("normal")), vec!["Day 1", ""]);
        assert_eq!(to_plain(&section("spacious")), vec!["", "Day 1", ""]);
    }

    #[test]
    fn test_error_and_loading() {
        assert_eq!(to_plain(&Node::text_node(NodeKind::Loading, "Loading...")), vec!["Loading..."]);
        assert_eq!(
            to_plain(&Node::text_node(NodeKind::Error, "Trip not found")),
            vec!["✖ Trip not found"]
        );
    }
}
