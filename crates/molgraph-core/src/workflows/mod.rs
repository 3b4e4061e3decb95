//! # Workflows Module
//!
//! The public entry point of the library.
//!
//! [`diagram::Diagram`] ties the [`core`](crate::core) data layer and the
//! [`engine`](crate::engine) together into the full update pipeline:
//!
//! 1. incoming nodes and links are reconciled against the previous data,
//! 2. the layout simulation is restarted over the merged arrays,
//! 3. the scene is joined to the new data,
//! 4. every tick moves the drawn elements to the new coordinates,
//! 5. clicks toggle the selection and re-join the scene.

pub mod diagram;

pub use diagram::{Diagram, UpdateReport};
