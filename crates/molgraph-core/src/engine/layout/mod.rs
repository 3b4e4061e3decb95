//! Force-directed layout of the diagram.
//!
//! A [`Simulation`] is started over the reconciled node and link arrays. Starting
//! places every node that has no position yet, binds link endpoints to node
//! indices ([`bind_links`]) and prepares the forces. Each [`Simulation::tick`] then
//! applies, in order:
//!
//! 1. [`LinkForce`]: springs between bonded atoms, with per-link distance and
//!    strength read lazily through accessors.
//! 2. [`ManyBodyForce`]: pairwise repulsion between all atoms.
//! 3. [`CenterForce`]: keeps the mean position on the canvas centre.
//!
//! followed by velocity decay and integration. The simulation cools
//! geometrically and stops ticking once its energy falls below the configured
//! threshold.

pub mod binding;
pub mod forces;
pub mod simulation;

pub use binding::{BindReport, UnresolvedLink, bind_links};
pub use forces::{CenterForce, Force, Jiggle, LinkAccessor, LinkForce, ManyBodyForce};
pub use simulation::{Simulation, TickInfo, TickOutcome, kinetic_energy};
