//! # Core Module
//!
//! Stateless building blocks of the diagram engine.
//!
//! ## Overview
//!
//! Everything in this layer is free of simulation or rendering state: typed
//! entity models, the reconciliation of incoming data against the previous
//! snapshot, ingestion and serialization formats, and the scene capability
//! interface that rendering is expressed against.
//!
//! ## Architecture
//!
//! - **Entity Models** ([`models`]) - Atoms, bonds and their identifiers
//! - **Reconciliation** ([`reconcile`]) - Identity-preserving merge of entity sets
//! - **Scene Interface** ([`scene`]) - Element creation and styling capabilities, plus a headless scene graph
//! - **File I/O** ([`io`]) - JSON graph ingestion and SVG output
//! - **Utilities** ([`utils`]) - Scales mapping data values to visual values

pub mod io;
pub mod models;
pub mod reconcile;
pub mod scene;
pub mod utils;
