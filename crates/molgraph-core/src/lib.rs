//! # molgraph
//!
//! An interactive molecular diagram engine: atoms and bonds laid out by a
//! force-directed simulation and drawn as an SVG scene that follows data
//! updates and atom selection.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data: typed atom and bond models, the
//!   model reconciler, JSON ingestion, and the [`Scene`](core::scene::Scene)
//!   capability interface with its headless implementation and SVG writer.
//!
//! - **[`engine`]: The Logic Core.** Stateful machinery: the force simulation, the
//!   keyed scene join, the per-tick transform updater and the selection controller.
//!
//! - **[`workflows`]: The Public API.** [`Diagram`](workflows::Diagram) drives the
//!   whole pipeline from new data to a repositioned scene.

pub mod core;
pub mod engine;
pub mod workflows;
