//! Render tree: the visual output of one render pass.
//!
//! A render pass produces a tree of [`Node`]s. Backends (text, JSON) only walk
//! this tree; they never look at the layout document again.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ActionType, Payload};
use crate::render::actions::ActionHandler;

/// Kind of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Page root holding sections and the action bar
    Page,
    /// Full-page loading takeover
    Loading,
    /// Full-page error takeover
    Error,
    /// One dispatched section
    Section,
    /// Section title (and optional subtitle)
    Heading,
    /// Plain text run
    Text,
    /// Image reference
    Image,
    /// Clickable action
    Button,
    /// Horizontal group of buttons
    ButtonRow,
    /// Header section body
    Header,
    /// Hero section body
    Hero,
    /// Column grid (cards, gallery, stats, recommendations)
    Grid,
    /// Content card
    Card,
    /// Numeric stat tile
    Stat,
    /// Vertical list
    List,
    /// List row
    Row,
    /// Timeline container
    Timeline,
    /// Timeline entry
    Entry,
    /// Calendar container
    Calendar,
    /// Calendar day group
    Day,
    /// Map container
    Map,
    /// Located map marker
    Marker,
    /// Form container
    Form,
    /// Form input field
    Field,
    /// Alerts container
    Alerts,
    /// Single alert
    Alert,
    /// Footer container
    Footer,
    /// Footer link
    Link,
    /// "Nothing here" message
    EmptyState,
    /// Unknown section type fallback
    Placeholder,
    /// Marker for children cut off by the depth bound
    Truncated,
    /// Container for nested child sections
    Children,
    /// Floating action bar
    ActionBar,
}

/// What a button fires when pressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBinding {
    /// Identifier handed to the action handler
    pub action_id: String,
    /// Opaque command identifier interpreted by the host
    pub command: String,
    /// Visual emphasis
    pub emphasis: ActionType,
    /// Payload forwarded verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

/// One element of the render tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Element kind
    pub kind: NodeKind,
    /// Stable key among siblings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Extra attributes (ordered for deterministic output)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    /// Action fired when this node is pressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionBinding>,
    /// Child elements in display order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            key: None,
            text: None,
            props: BTreeMap::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Creates a text node.
    pub fn text_node(kind: NodeKind, text: impl Into<String>) -> Self {
        Self::new(kind).with_text(text)
    }

    /// Sets the key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the display text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds an attribute.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Adds an attribute when `value` is present.
    pub fn with_opt_prop(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with_prop(name, v),
            None => self,
        }
    }

    /// Attaches an action binding.
    pub fn with_action(mut self, binding: ActionBinding) -> Self {
        self.action = Some(binding);
        self
    }

    /// Appends one child.
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends one child when present.
    pub fn with_opt_child(mut self, child: Option<Self>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    /// Appends several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns an attribute value.
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// Visits this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Collects every descendant (including self) of the given kind, in render order.
    pub fn find_all(&self, kind: NodeKind) -> Vec<&Self> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.kind == kind {
                found.push(node);
            }
        });
        found
    }

    /// Returns true when any node in the subtree carries exactly this text.
    pub fn contains_text(&self, needle: &str) -> bool {
        let mut hit = false;
        self.walk(&mut |node| {
            if node.text.as_deref() == Some(needle) {
                hit = true;
            }
        });
        hit
    }
}

/// Result of one render pass: the tree plus the handler its buttons fire into.
#[derive(Clone, Copy)]
pub struct Rendered<'h> {
    root: &'h Node,
    handler: Option<&'h dyn ActionHandler>,
}

impl<'h> Rendered<'h> {
    /// Binds a rendered tree to the handler its buttons should fire into.
    pub fn bind(root: &'h Node, handler: Option<&'h dyn ActionHandler>) -> Self {
        Self { root, handler }
    }

    /// All buttons in render order.
    pub fn buttons(&self) -> Vec<&'h Node> {
        self.root.find_all(NodeKind::Button)
    }

    /// Fires the first button whose action id matches.
    ///
    /// Returns false when no such button exists or no handler was supplied.
    pub fn press(&self, action_id: &str) -> bool {
        self.buttons()
            .into_iter()
            .find(|node| {
                node.action
                    .as_ref()
                    .is_some_and(|binding| binding.action_id == action_id)
            })
            .is_some_and(|node| self.fire(node))
    }

    /// Fires the n-th button in render order.
    pub fn press_nth(&self, index: usize) -> bool {
        self.buttons()
            .get(index)
            .is_some_and(|node| self.fire(node))
    }

    fn fire(&self, node: &Node) -> bool {
        match (self.handler, node.action.as_ref()) {
            (Some(handler), Some(binding)) => {
                handler.on_action(&binding.action_id, binding.payload.as_ref());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn button(id: &str) -> Node {
        Node::text_node(NodeKind::Button, id).with_action(ActionBinding {
            action_id: id.to_string(),
            command: format!("{id}_cmd"),
            emphasis: ActionType::Secondary,
            payload: None,
        })
    }

    #[test]
    fn test_find_all_is_preorder() {
        let tree = Node::new(NodeKind::Page)
            .with_child(Node::new(NodeKind::Section).with_child(button("a")))
            .with_child(button("b"));
        let ids: Vec<_> = tree
            .find_all(NodeKind::Button)
            .iter()
            .filter_map(|n| n.text.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_press_without_handler() {
        let tree = Node::new(NodeKind::Page).with_child(button("a"));
        let rendered = Rendered::bind(&tree, None);
        assert!(!rendered.press("a"));
    }

    #[test]
    fn test_press_routes_to_handler() {
        let calls = RefCell::new(Vec::new());
        let handler = |id: &str, _payload: Option<&Payload>| calls.borrow_mut().push(id.to_string());
        let tree = Node::new(NodeKind::Page)
            .with_child(button("a"))
            .with_child(button("b"));
        let handler_ref: &dyn ActionHandler = &handler;
        let rendered = Rendered::bind(&tree, Some(handler_ref));

        assert!(rendered.press("b"));
        assert!(rendered.press_nth(0));
        assert!(!rendered.press("missing"));
        assert!(!rendered.press_nth(5));
        assert_eq!(*calls.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = Node::text_node(NodeKind::Text, "hi");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "text", "text": "hi"}));
    }
}
