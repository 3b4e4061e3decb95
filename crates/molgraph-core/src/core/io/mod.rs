//! Reading diagram data and writing rendered scenes.
//!
//! - [`json`] - Validated ingestion of node/link snapshots
//! - [`svg`] - Serialization of a [`SceneGraph`](crate::core::scene::graph::SceneGraph) to SVG

pub mod json;
pub mod svg;
