//! The single side-effect channel out of the renderer.

use crate::models::{ContentAction, LayoutAction, Payload};
use crate::render::node::{ActionBinding, Node, NodeKind};
use crate::render::visibility::VisibilityContext;

/// Receives user-triggered actions.
///
/// Called synchronously when a rendered button is pressed. The renderer does
/// not interpret `action_id` or the payload and does not wait for any result.
pub trait ActionHandler {
    /// Handles one action.
    fn on_action(&self, action_id: &str, payload: Option<&Payload>);
}

impl<F> ActionHandler for F
where
    F: Fn(&str, Option<&Payload>),
{
    fn on_action(&self, action_id: &str, payload: Option<&Payload>) {
        self(action_id, payload);
    }
}

/// Builds a button node for a content action.
pub fn content_button(action: &ContentAction) -> Node {
    Node::text_node(NodeKind::Button, action.label.clone())
        .with_key(action.id.clone())
        .with_prop("emphasis", action.action_type.as_str())
        .with_action(ActionBinding {
            action_id: action.id.clone(),
            command: action.action.clone(),
            emphasis: action.action_type,
            payload: action.payload.clone(),
        })
}

/// Builds a button node for a page-level action.
pub fn layout_button(action: &LayoutAction) -> Node {
    Node::text_node(NodeKind::Button, action.label.clone())
        .with_key(action.id.clone())
        .with_prop("emphasis", action.action_type.as_str())
        .with_prop("position", action.position.as_str())
        .with_action(ActionBinding {
            action_id: action.id.clone(),
            command: action.action.clone(),
            emphasis: action.action_type,
            payload: action.payload.clone(),
        })
}

/// Renders an item's actions as a button row, skipping actions whose
/// condition the host rejects. Returns `None` when no button remains.
pub fn button_row(actions: &[ContentAction], visibility: &VisibilityContext<'_>) -> Option<Node> {
    let buttons: Vec<Node> = actions
        .iter()
        .filter(|action| visibility.allows_action(action.condition.as_deref()))
        .map(content_button)
        .collect();

    if buttons.is_empty() {
        None
    } else {
        Some(Node::new(NodeKind::ButtonRow).with_children(buttons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionPosition, ActionType};
    use serde_json::json;

    fn action(id: &str, condition: Option<&str>) -> ContentAction {
        ContentAction {
            id: id.to_string(),
            label: id.to_uppercase(),
            action_type: ActionType::Primary,
            action: format!("{id}_cmd"),
            payload: json!({"k": id}).as_object().cloned(),
            condition: condition.map(String::from),
        }
    }

    #[test]
    fn test_content_button_binding() {
        let node = content_button(&action("book", None));
        assert_eq!(node.kind, NodeKind::Button);
        assert_eq!(node.text.as_deref(), Some("BOOK"));
        let binding = node.action.unwrap();
        assert_eq!(binding.action_id, "book");
        assert_eq!(binding.command, "book_cmd");
        assert_eq!(binding.payload.unwrap()["k"], "book");
    }

    #[test]
    fn test_layout_button_position_prop() {
        let node = layout_button(&LayoutAction {
            id: "save".into(),
            label: "Save".into(),
            action_type: ActionType::Primary,
            action: "save_trip".into(),
            payload: None,
            position: ActionPosition::Floating,
        });
        assert_eq!(node.prop("position"), Some("floating"));
        assert_eq!(node.prop("emphasis"), Some("primary"));
    }

    #[test]
    fn test_button_row_filters_conditions() {
        let deny = |rule: &str| rule != "never";
        let visibility = VisibilityContext::new(false).with_evaluator(&deny);
        let actions = vec![action("a", None), action("b", Some("never")), action("c", Some("ok"))];
        let row = button_row(&actions, &visibility).unwrap();
        let keys: Vec<_> = row.children.iter().filter_map(|n| n.key.as_deref()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_button_row_empty() {
        let visibility = VisibilityContext::new(false);
        assert!(button_row(&[], &visibility).is_none());
    }
}
