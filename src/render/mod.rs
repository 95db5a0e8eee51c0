//! Server-driven layout rendering engine.
//!
//! A [`LayoutConfig`](crate::models::LayoutConfig) is turned into a tree of
//! [`Node`]s by [`LayoutRenderer`]. Rendering is a pure function of its
//! inputs: no I/O, no shared state, the same inputs always give the same tree.
//!
//! - [`dispatcher`] maps each section type to a sub-renderer in [`sections`]
//! - [`visibility`] gates sections before dispatch
//! - [`actions`] is the only way anything leaves the renderer
//! - [`text`] turns a tree into styled terminal lines

pub mod actions;
pub mod dispatcher;
pub mod node;
pub mod renderer;
pub mod sections;
pub mod text;
pub mod visibility;

use serde::{Deserialize, Serialize};

pub use actions::ActionHandler;
pub use dispatcher::SectionDispatcher;
pub use node::{ActionBinding, Node, NodeKind, Rendered};
pub use renderer::{LayoutRenderer, RenderProps};
pub use visibility::{RuleEvaluator, VisibilityContext};

/// Default bound on section nesting.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Tunables of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Deepest section level rendered; deeper children are truncated
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    /// Options with the given depth bound (at least 1).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }
}
