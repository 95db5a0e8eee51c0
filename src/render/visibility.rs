//! Section visibility evaluation.
//!
//! Visibility is checked before a section is dispatched. A hidden section is
//! skipped entirely, together with its whole subtree.

use crate::models::{LayoutSection, VisibilityCondition};

/// Host-supplied evaluator for opaque `custom` rules and action conditions.
pub trait RuleEvaluator {
    /// Returns true when the rule holds for the current viewer.
    fn evaluate(&self, rule: &str) -> bool;
}

impl<F> RuleEvaluator for F
where
    F: Fn(&str) -> bool,
{
    fn evaluate(&self, rule: &str) -> bool {
        self(rule)
    }
}

/// Viewer state the visibility rules are evaluated against.
#[derive(Clone, Copy, Default)]
pub struct VisibilityContext<'a> {
    /// Whether the viewer is signed in
    pub authenticated: bool,
    evaluator: Option<&'a dyn RuleEvaluator>,
}

impl std::fmt::Debug for VisibilityContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityContext")
            .field("authenticated", &self.authenticated)
            .field("has_evaluator", &self.evaluator.is_some())
            .finish()
    }
}

impl<'a> VisibilityContext<'a> {
    /// Context with the given auth state and no custom rule evaluator.
    pub const fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            evaluator: None,
        }
    }

    /// Attaches an evaluator for `custom` rules and action conditions.
    pub fn with_evaluator(mut self, evaluator: &'a dyn RuleEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Decides whether a section renders.
    ///
    /// `custom` rules with no evaluator, or with no rule text, render.
    pub fn is_visible(&self, section: &LayoutSection) -> bool {
        let Some(visibility) = &section.visibility else {
            return true;
        };

        match visibility.condition {
            VisibilityCondition::Always => true,
            VisibilityCondition::Authenticated => self.authenticated,
            VisibilityCondition::Anonymous => !self.authenticated,
            VisibilityCondition::Custom => match (self.evaluator, visibility.custom_rule.as_deref()) {
                (Some(evaluator), Some(rule)) => evaluator.evaluate(rule),
                _ => true,
            },
        }
    }

    /// Decides whether a content action with this condition is shown.
    pub fn allows_action(&self, condition: Option<&str>) -> bool {
        match (self.evaluator, condition) {
            (Some(evaluator), Some(rule)) => evaluator.evaluate(rule),
            _ => true,
        }
    }
}
