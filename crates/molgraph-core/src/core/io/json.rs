use crate::core::models::ids::{LinkId, NodeId};
use crate::core::models::link::{BondOrder, InvalidBondOrder, InvalidLinkStyle, Link, LinkStyle};
use crate::core::models::node::Node;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed graph data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Link {link}: {source}")]
    BondOrder {
        link: LinkId,
        #[source]
        source: InvalidBondOrder,
    },

    #[error("Link {link}: {source}")]
    Style {
        link: LinkId,
        #[source]
        source: InvalidLinkStyle,
    },

    #[error("{entity} {id}: field '{field}' must be a finite number, got {value}")]
    NonFinite {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Deserialize, Debug)]
struct RawNode {
    id: i64,
    atom: String,
    size: Option<f64>,
    color: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawLink {
    id: LinkId,
    source: i64,
    target: i64,
    bond: u8,
    distance: Option<f64>,
    strength: Option<f64>,
    style: Option<String>,
    color: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

fn finite(
    entity: &'static str,
    id: &dyn std::fmt::Display,
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, IngestError> {
    match value {
        Some(v) if !v.is_finite() => Err(IngestError::NonFinite {
            entity,
            id: id.to_string(),
            field,
            value: v,
        }),
        other => Ok(other),
    }
}

impl TryFrom<RawNode> for Node {
    type Error = IngestError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let id = NodeId(raw.id);
        let size = finite("Node", &id, "size", raw.size)?;
        Ok(Self {
            size,
            color: raw.color,
            ..Node::new(id, &raw.atom)
        })
    }
}

impl TryFrom<RawLink> for Link {
    type Error = IngestError;

    fn try_from(raw: RawLink) -> Result<Self, Self::Error> {
        let bond = BondOrder::try_from(raw.bond).map_err(|source| IngestError::BondOrder {
            link: raw.id.clone(),
            source,
        })?;
        let style = raw
            .style
            .as_deref()
            .map(str::parse::<LinkStyle>)
            .transpose()
            .map_err(|source| IngestError::Style {
                link: raw.id.clone(),
                source,
            })?;
        let distance = finite("Link", &raw.id, "distance", raw.distance)?;
        let strength = finite("Link", &raw.id, "strength", raw.strength)?;

        let mut link = Link::new(raw.id, raw.source, raw.target, bond);
        link.distance = distance;
        link.strength = strength;
        link.style = style;
        link.color = raw.color;
        Ok(link)
    }
}

/// One snapshot of diagram data as delivered by the external source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl GraphData {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    /// Parses and validates `{ "nodes": [...], "links": [...] }`.
    ///
    /// Unknown fields are ignored; bond orders outside `0..=3`, unknown link
    /// styles and non-finite numbers are rejected.
    pub fn from_json_str(input: &str) -> Result<Self, IngestError> {
        let raw: RawGraph = serde_json::from_str(input)?;
        Self::from_raw(raw)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, IngestError> {
        let raw: RawGraph = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_raw(raw: RawGraph) -> Result<Self, IngestError> {
        let nodes = raw
            .nodes
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let links = raw
            .links
            .into_iter()
            .map(Link::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { nodes, links })
    }
}
