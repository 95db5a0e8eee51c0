//! Layout renderer: the composition root of one render pass.

use crate::models::{LayoutConfig, Payload};
use crate::render::actions::{layout_button, ActionHandler};
use crate::render::dispatcher::SectionDispatcher;
use crate::render::node::{Node, NodeKind, Rendered};
use crate::render::visibility::VisibilityContext;
use crate::render::RenderOptions;

/// Inputs of one render pass besides the layout itself.
#[derive(Clone, Copy)]
pub struct RenderProps<'a> {
    /// Request-scoped data shared by all sections (weather, alerts, map center)
    pub data: &'a Payload,
    /// Upstream data is still being fetched
    pub loading: bool,
    /// Upstream fetch failed with this display message
    pub error: Option<&'a str>,
    /// Viewer state for visibility rules
    pub visibility: VisibilityContext<'a>,
    /// Receives pressed actions
    pub on_action: Option<&'a dyn ActionHandler>,
}

impl<'a> RenderProps<'a> {
    /// Props for a settled, anonymous render with the given data bag.
    pub const fn new(data: &'a Payload) -> Self {
        Self {
            data,
            loading: false,
            error: None,
            visibility: VisibilityContext::new(false),
            on_action: None,
        }
    }

    /// Sets the loading flag.
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Sets the error message.
    pub const fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Sets the viewer state.
    pub const fn visibility(mut self, visibility: VisibilityContext<'a>) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the action handler.
    pub fn on_action(mut self, handler: &'a dyn ActionHandler) -> Self {
        self.on_action = Some(handler);
        self
    }
}

/// Renders complete layouts.
#[derive(Debug, Clone, Default)]
pub struct LayoutRenderer {
    options: RenderOptions,
}

impl LayoutRenderer {
    /// Creates a renderer with the given options.
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The options this renderer was built with.
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders one layout.
    ///
    /// `loading` takes over the whole page, then `error`; otherwise every
    /// section is dispatched in array order followed by the floating action bar.
    pub fn render(&self, config: &LayoutConfig, props: &RenderProps<'_>) -> Node {
        if props.loading {
            return Node::text_node(NodeKind::Loading, "Loading...");
        }
        if let Some(message) = props.error {
            return Node::text_node(NodeKind::Error, message);
        }

        let dispatcher = SectionDispatcher::new(props.data, &props.visibility, &self.options);

        Node::text_node(NodeKind::Page, config.title.clone())
            .with_prop("mode", config.mode.as_str())
            .with_opt_prop("description", config.description.clone())
            .with_children(dispatcher.dispatch_all(&config.sections, 1))
            .with_opt_child(action_bar(config))
    }

    /// Renders a layout and binds the result to the props' action handler.
    pub fn render_bound<'n>(&self, config: &LayoutConfig, props: &RenderProps<'n>, out: &'n mut Node) -> Rendered<'n> {
        *out = self.render(config, props);
        Rendered::bind(out, props.on_action)
    }
}

/// Floating action bar; `top` and `bottom` actions are placed by the host page.
fn action_bar(config: &LayoutConfig) -> Option<Node> {
    let buttons: Vec<Node> = config.floating_actions().map(layout_button).collect();
    if buttons.is_empty() {
        None
    } else {
        Some(Node::new(NodeKind::ActionBar).with_children(buttons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Payload;
    use serde_json::json;
    use std::cell::RefCell;

    fn paris_trip() -> LayoutConfig {
        serde_json::from_value(json!({
            "mode": "itinerary",
            "title": "Paris Trip",
            "sections": [
                {"id": "s1", "type": "cards", "content": {"items": [{"id": "i1", "title": "Eiffel Tower"}]}}
            ],
            "actions": [
                {"id": "save", "label": "Save", "type": "primary", "action": "save_trip",
                 "position": "floating", "payload": {"tripId": "paris-2025"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_paris_trip_scenario() {
        let config = paris_trip();
        let data = Payload::new();
        let calls = RefCell::new(Vec::new());
        let handler = |id: &str, payload: Option<&Payload>| {
            calls.borrow_mut().push((id.to_string(), payload.cloned()));
        };
        let handler_ref: &dyn ActionHandler = &handler;
        let props = RenderProps::new(&data).on_action(handler_ref);

        let mut tree = Node::new(NodeKind::Page);
        let rendered = LayoutRenderer::default().render_bound(&config, &props, &mut tree);

        assert!(rendered.press("save"));
        let cards = tree.find_all(NodeKind::Card);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].text.as_deref(), Some("Eiffel Tower"));
        let bar = tree.find_all(NodeKind::ActionBar);
        assert_eq!(bar.len(), 1);
        assert_eq!(bar[0].children[0].text.as_deref(), Some("Save"));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "save");
        assert_eq!(calls[0].1.as_ref().unwrap()["tripId"], "paris-2025");
    }

    #[test]
    fn test_loading_beats_error() {
        let config = paris_trip();
        let data = Payload::new();
        let props = RenderProps::new(&data).loading(true).error(Some("boom"));
        let node = LayoutRenderer::default().render(&config, &props);
        assert_eq!(node.kind, NodeKind::Loading);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_error_takeover() {
        let config = paris_trip();
        let data = Payload::new();
        let props = RenderProps::new(&data).error(Some("Could not load trip"));
        let node = LayoutRenderer::default().render(&config, &props);
        assert_eq!(node.kind, NodeKind::Error);
        assert_eq!(node.text.as_deref(), Some("Could not load trip"));
        assert!(node.find_all(NodeKind::Section).is_empty());
    }

    #[test]
    fn test_only_floating_actions_rendered() {
        let config: LayoutConfig = serde_json::from_value(json!({
            "mode": "booking",
            "title": "Bookings",
            "actions": [
                {"id": "a", "label": "A", "action": "x", "position": "top"},
                {"id": "b", "label": "B", "action": "x", "position": "floating"},
                {"id": "c", "label": "C", "action": "x", "position": "bottom"}
            ]
        }))
        .unwrap();
        let data = Payload::new();
        let node = LayoutRenderer::default().render(&config, &RenderProps::new(&data));
        let bar = &node.find_all(NodeKind::ActionBar)[0];
        let keys: Vec<_> = bar.children.iter().filter_map(|n| n.key.as_deref()).collect();
        assert_eq!(keys, vec!["b"]);
    }

    #[test]
    fn test_no_floating_actions_no_bar() {
        let config = LayoutConfig::new(crate::models::LayoutMode::Guide, "Empty");
        let data = Payload::new();
        let node = LayoutRenderer::default().render(&config, &RenderProps::new(&data));
        assert!(node.find_all(NodeKind::ActionBar).is_empty());
        assert_eq!(node.text.as_deref(), Some("Empty"));
    }
}
