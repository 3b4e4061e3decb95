//! # Core Models Module
//!
//! Typed representations of the entities a molecular diagram is built from.
//!
//! ## Overview
//!
//! The external data source supplies loosely shaped node and link records. This
//! module turns them into explicit structures with optional fields modeled as
//! `Option`s, so defaults are applied deliberately instead of leaking undefined
//! values into layout or rendering math.
//!
//! ## Key Components
//!
//! - [`node`] - Atoms: display attributes plus layout position and velocity
//! - [`link`] - Bonds and distance constraints, bond orders and endpoint binding
//! - [`ids`] - Identifier types for atoms, bonds and scene elements
//!
//! ## Usage
//!
//! ```ignore
//! use molgraph::core::models::{link::{BondOrder, Link}, node::Node};
//!
//! let nodes = vec![Node::new(1, "C"), Node::new(2, "O").with_color("red")];
//! let links = vec![Link::new(1, 1, 2, BondOrder::Double)];
//! ```

pub mod ids;
pub mod link;
pub mod node;
