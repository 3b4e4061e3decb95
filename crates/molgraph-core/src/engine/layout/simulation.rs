use super::binding::{BindReport, bind_links};
use super::forces::{CenterForce, Force, Jiggle, LinkForce, ManyBodyForce};
use crate::core::models::link::Link;
use crate::core::models::node::Node;
use crate::engine::config::LayoutConfig;
use nalgebra::{Point2, Vector2};
use std::f64::consts::PI;
use tracing::{info, instrument, trace};

const INITIAL_RADIUS: f64 = 10.0;

/// Measurements of a single completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInfo {
    pub generation: u64,
    pub tick: u64,
    pub alpha: f64,
    pub kinetic_energy: f64,
    /// True when this tick cooled the simulation below `alpha_min`.
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Ticked(TickInfo),
    /// The simulation had already cooled down; nothing moved.
    Converged,
    /// The arrays passed in are not the ones this simulation was started on.
    Stale,
}

/// A running force-directed layout.
///
/// The simulation does not own the node and link arrays; the caller lends them
/// to [`start`](Self::start) and to every [`tick`](Self::tick). Restarting
/// means dropping this value and starting a new one, so a superseded
/// simulation can never tick again.
pub struct Simulation {
    generation: u64,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    alpha_target: f64,
    velocity_decay: f64,
    ticks: u64,
    forces: Vec<Box<dyn Force>>,
    jiggle: Jiggle,
    node_count: usize,
    link_count: usize,
}

impl Simulation {
    /// Places unpositioned nodes, binds links to node indices and initializes
    /// the forces.
    #[instrument(skip_all, name = "simulation_start", fields(generation = generation))]
    pub fn start(
        config: &LayoutConfig,
        generation: u64,
        nodes: &mut [Node],
        links: &mut [Link],
    ) -> (Self, BindReport) {
        let placed = place_nodes(nodes);
        let report = bind_links(nodes, links);

        let mut forces: Vec<Box<dyn Force>> = vec![
            Box::new(LinkForce::new(
                config.default_link_distance,
                config.default_link_strength,
            )),
            Box::new(ManyBodyForce::new(
                config.charge_strength,
                config.charge_distance_min,
            )),
            Box::new(CenterForce::new(config.center)),
        ];
        for force in forces.iter_mut() {
            force.initialize(nodes, links);
        }

        info!(
            nodes = nodes.len(),
            links = links.len(),
            placed,
            unresolved = report.unresolved.len(),
            "Simulation started."
        );

        let simulation = Self {
            generation,
            alpha: config.alpha,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: config.alpha_target,
            velocity_decay: config.velocity_decay,
            ticks: 0,
            forces,
            jiggle: Jiggle::new(config.seed),
            node_count: nodes.len(),
            link_count: links.len(),
        };
        (simulation, report)
    }

    /// Advances the layout by one step, mutating node positions and velocities in place.
    pub fn tick(&mut self, nodes: &mut [Node], links: &[Link]) -> TickOutcome {
        if nodes.len() != self.node_count || links.len() != self.link_count {
            return TickOutcome::Stale;
        }
        if !self.is_running() {
            return TickOutcome::Converged;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        for force in self.forces.iter_mut() {
            force.apply(nodes, links, self.alpha, &mut self.jiggle);
        }

        let retain = 1.0 - self.velocity_decay;
        for node in nodes.iter_mut() {
            node.velocity *= retain;
            node.position = Some(node.point() + node.velocity);
        }
        self.ticks += 1;

        let info = TickInfo {
            generation: self.generation,
            tick: self.ticks,
            alpha: self.alpha,
            kinetic_energy: kinetic_energy(nodes),
            converged: !self.is_running(),
        };
        trace!(
            tick = info.tick,
            alpha = info.alpha,
            kinetic_energy = info.kinetic_energy,
            "Tick."
        );
        if info.converged {
            info!(ticks = self.ticks, "Simulation converged.");
        }
        TickOutcome::Ticked(info)
    }

    pub fn is_running(&self) -> bool {
        self.alpha >= self.alpha_min
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Total kinetic energy of the nodes, each with unit mass.
pub fn kinetic_energy(nodes: &[Node]) -> f64 {
    nodes
        .iter()
        .map(|node| 0.5 * node.velocity.norm_squared())
        .sum()
}

/// Puts every node without a usable position on a phyllotaxis spiral around
/// the origin, keyed by its index. Returns the number of nodes placed.
fn place_nodes(nodes: &mut [Node]) -> usize {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let mut placed = 0;
    for (i, node) in nodes.iter_mut().enumerate() {
        let usable = node
            .position
            .is_some_and(|p| p.x.is_finite() && p.y.is_finite());
        if !usable {
            let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
            let angle = i as f64 * golden_angle;
            node.position = Some(Point2::new(radius * angle.cos(), radius * angle.sin()));
            placed += 1;
        }
        if !(node.velocity.x.is_finite() && node.velocity.y.is_finite()) {
            node.velocity = Vector2::zeros();
        }
    }
    placed
}
