//! # Engine Module
//!
//! The stateful half of the diagram: layout, rendering and selection.
//!
//! ## Overview
//!
//! Everything in [`crate::core`] is plain data. The engine turns that data into
//! a living picture. It owns the force simulation, keeps the scene's element
//! tree joined to the current atoms and bonds, moves the elements on every
//! tick, and tracks which atoms the user has selected.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Layout and rendering parameters with validating builders
//! - **Layout** ([`layout`]) - Link binding, forces and the cooling simulation
//! - **Rendering** ([`render`]) - Keyed enter/update/exit join and the per-tick transform updater
//! - **Selection** ([`selection`]) - The selection set and the click handler that owns it
//! - **Events** ([`events`]) - Observable diagram events delivered through a callback
//! - **Error Handling** ([`error`]) - Errors surfaced by the diagram pipeline

pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod render;
pub mod selection;
