use super::ids::{LinkId, NodeId};
use crate::core::reconcile::Entity;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of electron pairs a bond represents.
///
/// `Constraint` links take part in the layout but are drawn invisibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum BondOrder {
    Constraint = 0,
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl BondOrder {
    /// The bond count as an integer (0 for constraints).
    #[inline]
    pub fn count(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_visible(self) -> bool {
        self != Self::Constraint
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid bond order: {0} (expected 0, 1, 2 or 3)")]
pub struct InvalidBondOrder(pub String);

impl TryFrom<u8> for BondOrder {
    type Error = InvalidBondOrder;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Constraint),
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            3 => Ok(Self::Triple),
            other => Err(InvalidBondOrder(other.to_string())),
        }
    }
}

impl FromStr for BondOrder {
    type Err = InvalidBondOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "constraint" => Ok(Self::Constraint),
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            _ => Err(InvalidBondOrder(s.to_string())),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Constraint => "Constraint",
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
            }
        )
    }
}

/// Stroke pattern of a bond line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid link style: '{0}' (expected 'dashed' or 'solid')")]
pub struct InvalidLinkStyle(pub String);

impl FromStr for LinkStyle {
    type Err = InvalidLinkStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            _ => Err(InvalidLinkStyle(s.to_string())),
        }
    }
}

/// One end of a link.
///
/// Links arrive from the data source with raw node ids. The layout engine
/// rewrites each endpoint to `Bound`, recording the index of the referenced
/// node in the node array of the running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Id(NodeId),
    Bound { id: NodeId, index: usize },
}

impl Endpoint {
    #[inline]
    pub fn id(&self) -> NodeId {
        match *self {
            Self::Id(id) | Self::Bound { id, .. } => id,
        }
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        match *self {
            Self::Id(_) => None,
            Self::Bound { index, .. } => Some(index),
        }
    }

    pub fn unbound(self) -> Self {
        Self::Id(self.id())
    }
}

impl From<NodeId> for Endpoint {
    fn from(id: NodeId) -> Self {
        Self::Id(id)
    }
}

/// A bond or pure distance constraint between two atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub source: Endpoint,
    pub target: Endpoint,
    pub bond: BondOrder,
    /// Preferred length; the layout default applies when absent.
    pub distance: Option<f64>,
    /// Spring stiffness; the layout default applies when absent.
    pub strength: Option<f64>,
    pub style: Option<LinkStyle>,
    pub color: Option<String>,
}

impl Link {
    pub fn new(
        id: impl Into<LinkId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        bond: BondOrder,
    ) -> Self {
        Self {
            id: id.into(),
            source: Endpoint::Id(source.into()),
            target: Endpoint::Id(target.into()),
            bond,
            distance: None,
            strength: None,
            style: None,
            color: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_style(mut self, style: LinkStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Both endpoint indices, if the link has been bound to a node array.
    pub fn bound_indices(&self) -> Option<(usize, usize)> {
        Some((self.source.index()?, self.target.index()?))
    }

    pub fn is_bound(&self) -> bool {
        self.bound_indices().is_some()
    }

    pub fn is_dashed(&self) -> bool {
        self.style == Some(LinkStyle::Dashed)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.source.id() == node || self.target.id() == node
    }
}

impl Entity for Link {
    type Id = LinkId;

    fn id(&self) -> &LinkId {
        &self.id
    }

    fn assign(&mut self, incoming: Self) {
        self.id = incoming.id;
        self.source = incoming.source.unbound();
        self.target = incoming.target.unbound();
        self.bond = incoming.bond;
        self.distance = incoming.distance;
        self.strength = incoming.strength;
        self.style = incoming.style;
        self.color = incoming.color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_order_from_u8_accepts_zero_through_three() {
        assert_eq!(BondOrder::try_from(0u8), Ok(BondOrder::Constraint));
        assert_eq!(BondOrder::try_from(1u8), Ok(BondOrder::Single));
        assert_eq!(BondOrder::try_from(2u8), Ok(BondOrder::Double));
        assert_eq!(BondOrder::try_from(3u8), Ok(BondOrder::Triple));
        assert_eq!(
            BondOrder::try_from(4u8),
            Err(InvalidBondOrder("4".to_string()))
        );
    }

    #[test]
    fn bond_order_from_str_parses_names_and_digits() {
        assert_eq!("double".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("T".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("0".parse::<BondOrder>().unwrap(), BondOrder::Constraint);
        assert!("quadruple".parse::<BondOrder>().is_err());
    }

    #[test]
    fn only_constraint_bonds_are_invisible() {
        assert!(!BondOrder::Constraint.is_visible());
        assert!(BondOrder::Single.is_visible());
        assert!(BondOrder::Triple.is_visible());
        assert_eq!(BondOrder::Triple.count(), 3);
    }

    #[test]
    fn link_style_parses_case_insensitively() {
        assert_eq!("Dashed".parse::<LinkStyle>(), Ok(LinkStyle::Dashed));
        assert_eq!("solid".parse::<LinkStyle>(), Ok(LinkStyle::Solid));
        assert!("dotted".parse::<LinkStyle>().is_err());
    }

    #[test]
    fn new_link_is_unbound() {
        let link = Link::new(1, 1, 2, BondOrder::Single);
        assert_eq!(link.source, Endpoint::Id(NodeId(1)));
        assert!(!link.is_bound());
        assert!(link.contains(NodeId(2)));
        assert!(!link.contains(NodeId(3)));
    }

    #[test]
    fn assign_replaces_attributes_and_drops_stale_binding() {
        let mut existing = Link::new("a", 1, 2, BondOrder::Single);
        existing.source = Endpoint::Bound {
            id: NodeId(1),
            index: 0,
        };
        existing.target = Endpoint::Bound {
            id: NodeId(2),
            index: 1,
        };

        existing.assign(
            Link::new("a", 1, 3, BondOrder::Double).with_style(LinkStyle::Dashed),
        );

        assert_eq!(existing.source, Endpoint::Id(NodeId(1)));
        assert_eq!(existing.target, Endpoint::Id(NodeId(3)));
        assert_eq!(existing.bond, BondOrder::Double);
        assert!(existing.is_dashed());
    }
}
