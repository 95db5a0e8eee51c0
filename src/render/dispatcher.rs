//! Section dispatcher: maps a section's type to its sub-renderer and recurses
//! into children.

use tracing::debug;

use crate::models::{LayoutSection, Payload, SectionType};
use crate::render::node::{Node, NodeKind};
use crate::render::sections;
use crate::render::visibility::VisibilityContext;
use crate::render::RenderOptions;

/// Renders sections for one render pass.
///
/// Holds only borrowed, read-only inputs; dispatching never fails and never
/// touches anything outside the returned node.
#[derive(Debug, Clone, Copy)]
pub struct SectionDispatcher<'a> {
    data: &'a Payload,
    visibility: &'a VisibilityContext<'a>,
    options: &'a RenderOptions,
}

impl<'a> SectionDispatcher<'a> {
    /// Creates a dispatcher over the shared data bag and viewer state.
    pub const fn new(
        data: &'a Payload,
        visibility: &'a VisibilityContext<'a>,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            data,
            visibility,
            options,
        }
    }

    /// Renders a list of sibling sections at the given depth (top level is 1).
    ///
    /// Hidden sections are dropped; the rest keep their array order.
    pub fn dispatch_all(&self, sections: &[LayoutSection], depth: usize) -> Vec<Node> {
        sections
            .iter()
            .enumerate()
            .filter_map(|(index, section)| self.dispatch(section, index, depth))
            .collect()
    }

    /// Renders one section and its subtree, or `None` when it is hidden.
    pub fn dispatch(&self, section: &LayoutSection, index: usize, depth: usize) -> Option<Node> {
        if !self.visibility.is_visible(section) {
            debug!(section = %section.id, "Section hidden by visibility rule");
            return None;
        }

        let key = if section.id.is_empty() {
            format!("section-{index}")
        } else {
            section.id.clone()
        };

        let mut node = Node::new(NodeKind::Section)
            .with_key(key)
            .with_prop("type", section.section_type.as_str())
            .with_prop("spacing", section.spacing.as_str())
            .with_prop("depth", depth.to_string())
            .with_opt_prop("layout", section.layout.map(|kind| kind.as_str()));

        if !section.section_type.renders_own_title() {
            node = node.with_opt_child(heading(section));
        }

        node = node.with_child(self.render_body(section));

        if !section.children.is_empty() {
            node = node.with_child(self.render_children(&section.children, depth));
        }

        Some(node)
    }

    fn render_children(&self, children: &[LayoutSection], depth: usize) -> Node {
        let container = Node::new(NodeKind::Children);
        if depth >= self.options.max_depth {
            let omitted: usize = children.iter().map(LayoutSection::subtree_len).sum();
            debug!(depth, omitted, "Nested sections truncated at depth limit");
            return container.with_child(
                Node::text_node(
                    NodeKind::Truncated,
                    format!("{omitted} nested section(s) not shown"),
                )
                .with_prop("omitted", omitted.to_string()),
            );
        }
        container.with_children(self.dispatch_all(children, depth + 1))
    }

    fn render_body(&self, section: &LayoutSection) -> Node {
        let items = section.items();
        let title = section.title.as_deref();
        let subtitle = section.subtitle.as_deref();
        let columns = section.columns_or_default();
        let visibility = self.visibility;

        match &section.section_type {
            SectionType::Header => sections::header(title, subtitle, items),
            SectionType::Hero => sections::hero(title, subtitle, items, self.data, visibility),
            SectionType::Cards => sections::cards(items, columns, visibility),
            SectionType::List => sections::list(items, visibility),
            SectionType::Timeline => sections::timeline(items, visibility),
            SectionType::Calendar => sections::calendar(title, items, self.data, visibility),
            SectionType::Map => sections::map(title, items, self.data, visibility),
            SectionType::Form => sections::form(items, visibility),
            SectionType::Gallery => sections::gallery(items, columns, visibility),
            SectionType::Stats => sections::stats(items, columns, visibility),
            SectionType::Alerts => sections::alerts(items, self.data, visibility),
            SectionType::Recommendations => sections::recommendations(items, columns, visibility),
            SectionType::Footer => sections::footer(items, visibility),
            SectionType::Unknown(raw) => {
                debug!(section = %section.id, section_type = %raw, "Unknown section type");
                sections::placeholder(raw)
            }
        }
    }
}

/// Title/subtitle heading rendered once above dispatched content.
fn heading(section: &LayoutSection) -> Option<Node> {
    let title = section.title.as_deref()?;
    Some(
        Node::text_node(NodeKind::Heading, title)
            .with_opt_prop("subtitle", section.subtitle.clone()),
    )
}
