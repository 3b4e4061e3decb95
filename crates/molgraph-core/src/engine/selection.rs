use crate::core::models::ids::NodeId;
use crate::core::models::link::Link;
use crate::core::models::node::Node;
use crate::core::scene::Scene;
use crate::engine::render::SceneRenderer;
use tracing::debug;

/// Ordered set of selected atom ids. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Removes `id` if present, appends it otherwise. Returns whether it is now selected.
    fn toggle(&mut self, id: NodeId) -> bool {
        match self.ids.iter().position(|selected| *selected == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }
}

/// Result of a click on an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub node: NodeId,
    pub selected: bool,
}

/// Sole owner of the [`Selection`].
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggles `node` in the selection, then re-joins atoms and bonds so the
    /// `selected` state shows immediately.
    pub fn on_click_node<S: Scene>(
        &mut self,
        node: NodeId,
        renderer: &mut SceneRenderer,
        scene: &mut S,
        nodes: &[Node],
        links: &[Link],
    ) -> SelectionChange {
        let selected = self.selection.toggle(node);
        debug!(node = %node, selected, total = self.selection.len(), "Selection toggled.");

        renderer.render_nodes(scene, nodes, self.selection.as_slice());
        renderer.render_links(scene, links, nodes);

        SelectionChange { node, selected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::graph::SceneGraph;
    use crate::engine::config::RenderConfig;
    use crate::engine::render::MountPoints;

    #[test]
    fn toggle_appends_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle(NodeId(3)));
        assert!(selection.toggle(NodeId(1)));
        assert_eq!(selection.as_slice(), &[NodeId(3), NodeId(1)]);

        assert!(!selection.toggle(NodeId(3)));
        assert_eq!(selection.as_slice(), &[NodeId(1)]);
    }

    #[test]
    fn clicking_twice_restores_the_original_selection() {
        let mut scene = SceneGraph::new(250.0, 250.0);
        let root = scene.root();
        let mut renderer = SceneRenderer::new(RenderConfig::default(), MountPoints::create(&mut scene, root));
        let nodes = vec![Node::new(1, "C"), Node::new(2, "O")];
        let mut controller = SelectionController::new();
        controller.on_click_node(NodeId(1), &mut renderer, &mut scene, &nodes, &[]);
        let before = controller.selection().clone();

        let first = controller.on_click_node(NodeId(2), &mut renderer, &mut scene, &nodes, &[]);
        let second = controller.on_click_node(NodeId(2), &mut renderer, &mut scene, &nodes, &[]);

        assert!(first.selected);
        assert!(!second.selected);
        assert_eq!(controller.selection(), &before);
    }

    #[test]
    fn click_restyles_the_clicked_atom() {
        let mut scene = SceneGraph::new(250.0, 250.0);
        let root = scene.root();
        let mut renderer = SceneRenderer::new(RenderConfig::default(), MountPoints::create(&mut scene, root));
        let nodes = vec![Node::new(1, "C")];
        renderer.render_nodes(&mut scene, &nodes, &[]);
        let group = renderer.node_elements(NodeId(1)).unwrap().group;

        SelectionController::new().on_click_node(NodeId(1), &mut renderer, &mut scene, &nodes, &[]);

        assert!(scene.element(group).unwrap().has_class("selected"));
    }
}
