use super::style::choose_color;
use crate::core::models::ids::ElementId;
use crate::core::models::node::Node;
use crate::core::scene::{AttrValue, Scene, Tag};
use crate::core::utils::scale::SqrtScale;
use crate::engine::config::RenderConfig;

pub const NODE_CLASS: &str = "node";
pub const CIRCLE_CLASS: &str = "atom-circle";
pub const LABEL_CLASS: &str = "atom-label";
pub const SELECTED_CLASS: &str = "selected";

/// The visual elements of one atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeElements {
    pub group: ElementId,
    pub circle: ElementId,
    pub label: ElementId,
    /// Position of the atom in the node array of the last join.
    pub index: usize,
}

impl NodeElements {
    /// Creates the group, circle and label of a newly entered atom.
    pub(super) fn create<S: Scene>(scene: &mut S, parent: ElementId, node: &Node, index: usize) -> Self {
        let group = scene.create_element(parent, Tag::Group);
        scene.set_class(group, NODE_CLASS, true);
        scene.set_click_target(group, node.id);
        scene.set_attribute(group, "index", AttrValue::Text(node.id.to_string()));

        let circle = scene.create_element(group, Tag::Circle);
        scene.set_class(circle, CIRCLE_CLASS, true);

        let label = scene.create_element(group, Tag::Text);
        scene.set_class(label, LABEL_CLASS, true);
        scene.set_attribute(label, "dy", AttrValue::from(".35em"));
        scene.set_attribute(label, "text-anchor", AttrValue::from("middle"));

        Self {
            group,
            circle,
            label,
            index,
        }
    }

    pub(super) fn restyle<S: Scene>(
        &self,
        scene: &mut S,
        node: &Node,
        config: &RenderConfig,
        radius: &SqrtScale,
        selected: bool,
    ) {
        scene.set_class(self.group, SELECTED_CLASS, selected);
        scene.set_attribute(
            self.circle,
            "r",
            AttrValue::Number(radius.apply(node.size_or_default())),
        );
        scene.set_style(
            self.circle,
            "fill",
            AttrValue::from(choose_color(node.color.as_deref(), &config.default_node_color)),
        );
        scene.set_text(self.label, &node.atom);
    }
}
