use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// An identifiable diagram entity whose simulation state must survive updates.
pub trait Entity {
    type Id: Eq + Hash + Clone + Debug;

    fn id(&self) -> &Self::Id;

    /// Copies the data-source attributes of `incoming` onto `self`, leaving any
    /// simulation-owned state untouched.
    fn assign(&mut self, incoming: Self);
}

/// Counts describing the outcome of a [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entities that existed before and were updated in place.
    pub retained: usize,
    /// Entities seen for the first time.
    pub entered: usize,
    /// Previous entities absent from the incoming data.
    pub dropped: usize,
    /// Incoming entries discarded because a later entry reused their id.
    pub duplicates: usize,
}

/// Merges `incoming` into `previous`, preserving the identity and simulation
/// state of entities that persist.
///
/// The result follows the order of `incoming`. An entity whose id already
/// exists in `previous` is the *previous* object with the incoming attributes
/// assigned onto it; every other incoming entity is used as-is. Entities of
/// `previous` that are absent from `incoming` are dropped. When an id appears
/// more than once in `incoming`, the last occurrence wins.
pub fn merge<T: Entity>(previous: Vec<T>, incoming: Vec<T>) -> Vec<T> {
    merge_with_stats(previous, incoming).0
}

/// Same as [`merge`], additionally returning [`MergeStats`].
pub fn merge_with_stats<T: Entity>(previous: Vec<T>, incoming: Vec<T>) -> (Vec<T>, MergeStats) {
    let mut stats = MergeStats::default();

    let mut last_index: HashMap<T::Id, usize> = HashMap::with_capacity(incoming.len());
    for (i, entity) in incoming.iter().enumerate() {
        last_index.insert(entity.id().clone(), i);
    }

    let mut existing: HashMap<T::Id, T> = HashMap::with_capacity(previous.len());
    for entity in previous {
        existing.insert(entity.id().clone(), entity);
    }

    let mut merged = Vec::with_capacity(last_index.len());
    for (i, entity) in incoming.into_iter().enumerate() {
        if last_index.get(entity.id()) != Some(&i) {
            warn!(
                "Duplicate id {:?} in incoming data; keeping the last occurrence.",
                entity.id()
            );
            stats.duplicates += 1;
            continue;
        }
        match existing.remove(entity.id()) {
            Some(mut kept) => {
                kept.assign(entity);
                stats.retained += 1;
                merged.push(kept);
            }
            None => {
                stats.entered += 1;
                merged.push(entity);
            }
        }
    }
    stats.dropped = existing.len();

    debug!(
        retained = stats.retained,
        entered = stats.entered,
        dropped = stats.dropped,
        duplicates = stats.duplicates,
        "Merged entity set."
    );
    (merged, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::{LinkId, NodeId};
    use crate::core::models::link::{BondOrder, Endpoint, Link};
    use crate::core::models::node::Node;
    use nalgebra::{Point2, Vector2};

    #[test]
    fn merge_preserves_position_of_existing_node() {
        let previous = vec![Node::new(1, "C").at(10.0, 20.0)];
        let incoming = vec![Node::new(1, "C").with_size(2.0)];

        let merged = merge(previous, incoming);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].position, Some(Point2::new(10.0, 20.0)));
        assert_eq!(merged[0].size, Some(2.0));
    }

    #[test]
    fn merge_preserves_velocity_of_existing_node() {
        let mut kept = Node::new(1, "C").at(1.0, 1.0);
        kept.velocity = Vector2::new(3.0, 4.0);

        let merged = merge(vec![kept], vec![Node::new(1, "O")]);

        assert_eq!(merged[0].velocity, Vector2::new(3.0, 4.0));
        assert_eq!(merged[0].atom, "O");
    }

    #[test]
    fn merge_drops_entities_absent_from_incoming() {
        let previous = vec![Node::new(1, "C"), Node::new(2, "O")];
        let (merged, stats) = merge_with_stats(previous, vec![Node::new(1, "C")]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, NodeId(1));
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.retained, 1);
    }

    #[test]
    fn merge_with_empty_previous_treats_everything_as_new() {
        let incoming = vec![Node::new(1, "C").at(5.0, 5.0), Node::new(2, "H")];
        let (merged, stats) = merge_with_stats(Vec::new(), incoming.clone());

        assert_eq!(merged, incoming);
        assert_eq!(stats.entered, 2);
        assert_eq!(stats.retained, 0);
    }

    #[test]
    fn merge_follows_incoming_order() {
        let previous = vec![Node::new(1, "C"), Node::new(2, "O"), Node::new(3, "N")];
        let incoming = vec![Node::new(3, "N"), Node::new(4, "H"), Node::new(1, "C")];

        let ids: Vec<_> = merge(previous, incoming).iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![NodeId(3), NodeId(4), NodeId(1)]);
    }

    #[test]
    fn merge_keeps_last_occurrence_of_duplicate_ids() {
        let incoming = vec![Node::new(1, "C"), Node::new(2, "O"), Node::new(1, "N")];
        let (merged, stats) = merge_with_stats(Vec::new(), incoming);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, NodeId(2));
        assert_eq!(merged[1].atom, "N");
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn merge_updates_links_and_resets_endpoints_to_raw_ids() {
        let mut bound = Link::new("b1", 1, 2, BondOrder::Single);
        bound.source = Endpoint::Bound {
            id: NodeId(1),
            index: 0,
        };
        let incoming = vec![Link::new("b1", 1, 2, BondOrder::Triple)];

        let merged = merge(vec![bound], incoming);

        assert_eq!(merged[0].id, LinkId::from("b1"));
        assert_eq!(merged[0].bond, BondOrder::Triple);
        assert_eq!(merged[0].source, Endpoint::Id(NodeId(1)));
    }
}
