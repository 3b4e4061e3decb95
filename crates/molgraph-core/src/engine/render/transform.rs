use super::SceneRenderer;
use super::links::{coordinates, label_position};
use crate::core::models::node::Node;
use crate::core::scene::{AttrValue, Scene};

/// Moves every drawn atom and bond to the current node coordinates.
///
/// Only attributes of existing elements are written; no element is created,
/// removed or re-keyed. Calling it twice with unchanged coordinates writes
/// identical values.
pub fn update_transforms<S: Scene>(scene: &mut S, renderer: &SceneRenderer, nodes: &[Node]) {
    for elements in renderer.all_node_elements() {
        let (x, y) = coordinates(nodes, elements.index);
        scene.set_attribute(elements.group, "transform", AttrValue::Translate(x, y));
    }

    for elements in renderer.all_link_elements() {
        let (x1, y1) = coordinates(nodes, elements.source);
        let (x2, y2) = coordinates(nodes, elements.target);
        for line in elements.lines() {
            scene.set_attribute(line, "x1", AttrValue::Number(x1));
            scene.set_attribute(line, "y1", AttrValue::Number(y1));
            scene.set_attribute(line, "x2", AttrValue::Number(x2));
            scene.set_attribute(line, "y2", AttrValue::Number(y2));
        }
        let (x, y) = label_position(nodes, elements.source, elements.target);
        scene.set_attribute(elements.label, "x", AttrValue::Number(x));
        scene.set_attribute(elements.label, "y", AttrValue::Number(y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::{ElementId, LinkId, NodeId};
    use crate::core::models::link::{BondOrder, Link};
    use crate::core::scene::graph::SceneGraph;
    use crate::engine::config::RenderConfig;
    use crate::engine::layout::bind_links;
    use crate::engine::render::MountPoints;

    fn rendered(nodes: &[Node], links: Vec<Link>) -> (SceneGraph, SceneRenderer, Vec<Link>) {
        let mut scene = SceneGraph::new(250.0, 250.0);
        let root = scene.root();
        let mounts = MountPoints::create(&mut scene, root);
        let mut renderer = SceneRenderer::new(RenderConfig::default(), mounts);
        let mut links = links;
        bind_links(nodes, &mut links);
        renderer.render_nodes(&mut scene, nodes, &[]);
        renderer.render_links(&mut scene, &links, nodes);
        (scene, renderer, links)
    }

    fn attr(scene: &SceneGraph, id: ElementId, name: &str) -> AttrValue {
        scene.element(id).unwrap().attribute(name).cloned().unwrap()
    }

    #[test]
    fn atoms_are_translated_to_their_positions() {
        let nodes = vec![Node::new(1, "C").at(30.0, 40.5), Node::new(2, "O")];
        let (mut scene, renderer, _) = rendered(&nodes, Vec::new());

        update_transforms(&mut scene, &renderer, &nodes);

        let placed = renderer.node_elements(NodeId(1)).unwrap().group;
        let unplaced = renderer.node_elements(NodeId(2)).unwrap().group;
        assert_eq!(attr(&scene, placed, "transform"), AttrValue::Translate(30.0, 40.5));
        assert_eq!(attr(&scene, unplaced, "transform"), AttrValue::Translate(0.0, 0.0));
    }

    #[test]
    fn all_bond_lines_follow_endpoints_and_label_sits_at_midpoint() {
        let nodes = vec![Node::new(1, "C").at(10.0, 10.0), Node::new(2, "N").at(30.0, 50.0)];
        let (mut scene, renderer, _) =
            rendered(&nodes, vec![Link::new(1, 1, 2, BondOrder::Triple)]);

        update_transforms(&mut scene, &renderer, &nodes);

        let elements = *renderer.link_elements(&LinkId::Number(1)).unwrap();
        assert_eq!(elements.lines().count(), 3);
        for line in elements.lines() {
            assert_eq!(attr(&scene, line, "x1"), AttrValue::Number(10.0));
            assert_eq!(attr(&scene, line, "y1"), AttrValue::Number(10.0));
            assert_eq!(attr(&scene, line, "x2"), AttrValue::Number(30.0));
            assert_eq!(attr(&scene, line, "y2"), AttrValue::Number(50.0));
        }
        assert_eq!(attr(&scene, elements.label, "x"), AttrValue::Number(20.0));
        assert_eq!(attr(&scene, elements.label, "y"), AttrValue::Number(30.0));
    }

    #[test]
    fn repeated_updates_without_movement_write_identical_values() {
        let nodes = vec![Node::new(1, "C").at(1.25, 2.5), Node::new(2, "O").at(7.0, -3.0)];
        let (mut scene, renderer, _) =
            rendered(&nodes, vec![Link::new(1, 1, 2, BondOrder::Double)]);

        update_transforms(&mut scene, &renderer, &nodes);
        let first = scene.clone();
        update_transforms(&mut scene, &renderer, &nodes);

        assert_eq!(first.len(), scene.len());
        for id in scene.find_by_class(scene.root(), "link-line") {
            assert_eq!(first.element(id), scene.element(id));
        }
        let group = renderer.node_elements(NodeId(2)).unwrap().group;
        assert_eq!(first.element(group), scene.element(group));
    }

    #[test]
    fn non_finite_coordinates_fall_back_to_origin() {
        let nodes = vec![Node::new(1, "C").at(f64::NAN, 5.0)];
        let (mut scene, renderer, _) = rendered(&nodes, Vec::new());

        update_transforms(&mut scene, &renderer, &nodes);

        let group = renderer.node_elements(NodeId(1)).unwrap().group;
        assert_eq!(attr(&scene, group, "transform"), AttrValue::Translate(0.0, 5.0));
    }
}
