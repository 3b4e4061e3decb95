//! # Render Module
//!
//! Keeps the element tree of a [`Scene`] in step with the node and link arrays.
//!
//! [`SceneRenderer`] performs a keyed join (key = entity id) on every call to
//! [`render_nodes`](SceneRenderer::render_nodes) and
//! [`render_links`](SceneRenderer::render_links):
//!
//! - **enter**: entities without elements get a freshly created element group,
//! - **update**: every joined entity is restyled (color, width, dash pattern,
//!   selection state),
//! - **exit**: element groups whose entity disappeared are removed.
//!
//! Per-tick repositioning does not join at all; see [`transform`].

pub mod links;
pub mod nodes;
pub mod style;
pub mod transform;

use crate::core::models::ids::{ElementId, LinkId, NodeId};
use crate::core::models::link::Link;
use crate::core::models::node::Node;
use crate::core::scene::{Scene, Tag};
use crate::core::utils::scale::SqrtScale;
use crate::engine::config::RenderConfig;
use links::LinkElements;
use nodes::NodeElements;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, warn};

pub use transform::update_transforms;

/// The two layer groups the renderer draws into. Links sit below nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountPoints {
    pub links: ElementId,
    pub nodes: ElementId,
}

impl MountPoints {
    /// Creates a `links` and a `nodes` layer under `parent`, in that order.
    pub fn create<S: Scene>(scene: &mut S, parent: ElementId) -> Self {
        let links = scene.create_element(parent, Tag::Group);
        scene.set_class(links, "links", true);
        let nodes = scene.create_element(parent, Tag::Group);
        scene.set_class(nodes, "nodes", true);
        Self { links, nodes }
    }
}

/// Element counts of one join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Maps each id to the index of its last occurrence in `items`.
fn latest_indices<T, K: Eq + Hash + Clone>(items: &[T], key: impl Fn(&T) -> &K) -> HashMap<K, usize> {
    let mut latest = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        latest.insert(key(item).clone(), index);
    }
    latest
}

pub struct SceneRenderer {
    config: RenderConfig,
    radius: SqrtScale,
    mounts: MountPoints,
    nodes: HashMap<NodeId, NodeElements>,
    links: HashMap<LinkId, LinkElements>,
}

impl SceneRenderer {
    pub fn new(config: RenderConfig, mounts: MountPoints) -> Self {
        let radius = SqrtScale::new(config.radius_domain, config.radius_range).clamped();
        Self {
            config,
            radius,
            mounts,
            nodes: HashMap::new(),
            links: HashMap::new(),
        }
    }

    /// Joins atoms to their element groups.
    ///
    /// The `selected` class of every atom group is recomputed from `selection`.
    pub fn render_nodes<S: Scene>(&mut self, scene: &mut S, nodes: &[Node], selection: &[NodeId]) -> JoinStats {
        let latest = latest_indices(nodes, |node| &node.id);
        if latest.len() < nodes.len() {
            warn!(
                duplicates = nodes.len() - latest.len(),
                "Duplicate atom ids; the last occurrence of each is drawn."
            );
        }

        let mut stats = JoinStats::default();
        self.nodes.retain(|id, elements| {
            let keep = latest.contains_key(id);
            if !keep {
                scene.remove_element(elements.group);
                stats.exited += 1;
            }
            keep
        });

        for (index, node) in nodes.iter().enumerate() {
            if latest.get(&node.id) != Some(&index) {
                continue;
            }
            let elements = if let Some(elements) = self.nodes.get_mut(&node.id) {
                elements.index = index;
                stats.updated += 1;
                *elements
            } else {
                let elements = NodeElements::create(scene, self.mounts.nodes, node, index);
                self.nodes.insert(node.id, elements);
                stats.entered += 1;
                elements
            };
            let selected = selection.contains(&node.id);
            elements.restyle(scene, node, &self.config, &self.radius, selected);
        }

        debug!(
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "Joined atoms."
        );
        stats
    }

    /// Joins bonds to their element groups.
    ///
    /// Links that are not bound to the node array are not drawn; an element
    /// group drawn for such a link earlier is removed.
    pub fn render_links<S: Scene>(&mut self, scene: &mut S, links: &[Link], nodes: &[Node]) -> JoinStats {
        let latest = latest_indices(links, |link| &link.id);
        if latest.len() < links.len() {
            warn!(
                duplicates = links.len() - latest.len(),
                "Duplicate link ids; the last occurrence of each is drawn."
            );
        }
        let drawable = |id: &LinkId| {
            latest
                .get(id)
                .is_some_and(|&index| links[index].is_bound())
        };

        let mut stats = JoinStats::default();
        self.links.retain(|id, elements| {
            let keep = drawable(id);
            if !keep {
                scene.remove_element(elements.group);
                stats.exited += 1;
            }
            keep
        });

        for (index, link) in links.iter().enumerate() {
            if latest.get(&link.id) != Some(&index) {
                continue;
            }
            let Some((source, target)) = link.bound_indices() else {
                continue;
            };
            if let Some(elements) = self.links.get_mut(&link.id) {
                elements.source = source;
                elements.target = target;
                stats.updated += 1;
            } else {
                let created = LinkElements::create(scene, self.mounts.links, source, target);
                self.links.insert(link.id.clone(), created);
                stats.entered += 1;
            }
            if let Some(elements) = self.links.get_mut(&link.id) {
                elements.restyle(scene, link, nodes, &self.config);
            }
        }

        debug!(
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "Joined links."
        );
        stats
    }

    pub fn mounts(&self) -> MountPoints {
        self.mounts
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn node_elements(&self, id: NodeId) -> Option<&NodeElements> {
        self.nodes.get(&id)
    }

    pub fn link_elements(&self, id: &LinkId) -> Option<&LinkElements> {
        self.links.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn all_node_elements(&self) -> impl Iterator<Item = &NodeElements> {
        self.nodes.values()
    }

    pub(crate) fn all_link_elements(&self) -> impl Iterator<Item = &LinkElements> {
        self.links.values()
    }
}
