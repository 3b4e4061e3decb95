use crate::core::models::ids::{LinkId, NodeId};
use crate::core::models::link::{Endpoint, Link};
use crate::core::models::node::Node;
use std::collections::HashMap;

/// A link that references at least one atom absent from the node set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedLink {
    pub link: LinkId,
    pub missing: Vec<NodeId>,
}

/// Outcome of binding link endpoints to a node array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub bound: usize,
    pub unresolved: Vec<UnresolvedLink>,
}

impl BindReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Rewrites every link endpoint to reference its node by index in `nodes`.
///
/// Links whose source or target id is not present in `nodes` are left with
/// raw (unbound) endpoints and listed in the report; layout and rendering skip
/// them.
pub fn bind_links(nodes: &[Node], links: &mut [Link]) -> BindReport {
    let index_by_id: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id, index))
        .collect();

    let resolve = |endpoint: Endpoint| -> Result<Endpoint, NodeId> {
        let id = endpoint.id();
        index_by_id
            .get(&id)
            .map(|&index| Endpoint::Bound { id, index })
            .ok_or(id)
    };

    let mut report = BindReport::default();
    for link in links.iter_mut() {
        match (resolve(link.source), resolve(link.target)) {
            (Ok(source), Ok(target)) => {
                link.source = source;
                link.target = target;
                report.bound += 1;
            }
            (source, target) => {
                link.source = link.source.unbound();
                link.target = link.target.unbound();
                let missing = [source.err(), target.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                report.unresolved.push(UnresolvedLink {
                    link: link.id.clone(),
                    missing,
                });
            }
        }
    }
    report
}
