use crate::core::models::link::Link;
use crate::core::models::node::Node;
use nalgebra::{Point2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const JIGGLE_MAGNITUDE: f64 = 1e-6;

/// Tiny deterministic perturbation separating coincident points.
#[derive(Debug, Clone)]
pub struct Jiggle {
    rng: StdRng,
}

impl Jiggle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn next(&mut self) -> f64 {
        (self.rng.gen_range(0.0..1.0) - 0.5) * JIGGLE_MAGNITUDE
    }

    /// Replaces zero components of `delta` with a jiggle.
    #[inline]
    fn separate(&mut self, mut delta: Vector2<f64>) -> Vector2<f64> {
        if delta.x == 0.0 {
            delta.x = self.next();
        }
        if delta.y == 0.0 {
            delta.y = self.next();
        }
        delta
    }
}

/// A force acting on node velocities (or positions) once per tick.
pub trait Force {
    /// Called once when the simulation (re)starts with a new node/link set.
    fn initialize(&mut self, nodes: &[Node], links: &[Link]);

    fn apply(&mut self, nodes: &mut [Node], links: &[Link], alpha: f64, jiggle: &mut Jiggle);
}

/// Reads a per-link parameter, applying defaults at read time.
pub type LinkAccessor = Box<dyn Fn(&Link) -> f64>;

/// Spring force pulling linked atoms towards their preferred distance.
pub struct LinkForce {
    distance: LinkAccessor,
    strength: LinkAccessor,
    bias: Vec<f64>,
}

impl LinkForce {
    /// Link force reading `link.distance` / `link.strength`, falling back to the given defaults.
    pub fn new(default_distance: f64, default_strength: f64) -> Self {
        Self {
            distance: Box::new(move |link: &Link| link.distance.unwrap_or(default_distance)),
            strength: Box::new(move |link: &Link| link.strength.unwrap_or(default_strength)),
            bias: Vec::new(),
        }
    }

    pub fn distance(mut self, accessor: impl Fn(&Link) -> f64 + 'static) -> Self {
        self.distance = Box::new(accessor);
        self
    }

    pub fn strength(mut self, accessor: impl Fn(&Link) -> f64 + 'static) -> Self {
        self.strength = Box::new(accessor);
        self
    }
}

impl Force for LinkForce {
    fn initialize(&mut self, nodes: &[Node], links: &[Link]) {
        let mut degree = vec![0usize; nodes.len()];
        for (source, target) in links.iter().filter_map(Link::bound_indices) {
            degree[source] += 1;
            degree[target] += 1;
        }
        self.bias = links
            .iter()
            .map(|link| match link.bound_indices() {
                Some((source, target)) => {
                    degree[source] as f64 / (degree[source] + degree[target]) as f64
                }
                None => 0.0,
            })
            .collect();
    }

    fn apply(&mut self, nodes: &mut [Node], links: &[Link], alpha: f64, jiggle: &mut Jiggle) {
        for (link, &bias) in links.iter().zip(&self.bias) {
            let Some((s, t)) = link.bound_indices() else {
                continue;
            };
            let source_next = nodes[s].point() + nodes[s].velocity;
            let target_next = nodes[t].point() + nodes[t].velocity;
            let delta = jiggle.separate(target_next - source_next);
            let length = delta.norm();
            let pull = (length - (self.distance)(link)) / length * alpha * (self.strength)(link);
            let correction = delta * pull;

            nodes[t].velocity -= correction * bias;
            nodes[s].velocity += correction * (1.0 - bias);
        }
    }
}

/// Pairwise charge between all atoms; negative strength repels.
///
/// Computed exactly over all pairs, which suits molecule-sized graphs.
#[derive(Debug, Clone)]
pub struct ManyBodyForce {
    strength: f64,
    distance_min_squared: f64,
}

impl ManyBodyForce {
    pub fn new(strength: f64, distance_min: f64) -> Self {
        Self {
            strength,
            distance_min_squared: distance_min * distance_min,
        }
    }
}

impl Force for ManyBodyForce {
    fn initialize(&mut self, _nodes: &[Node], _links: &[Link]) {}

    fn apply(&mut self, nodes: &mut [Node], _links: &[Link], alpha: f64, jiggle: &mut Jiggle) {
        let n = nodes.len();
        for i in 0..n {
            let here = nodes[i].point();
            let mut push = Vector2::zeros();
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = jiggle.separate(nodes[j].point() - here);
                let mut l = delta.norm_squared();
                if l < self.distance_min_squared {
                    l = (self.distance_min_squared * l).sqrt();
                }
                push += delta * (self.strength * alpha / l);
            }
            nodes[i].velocity += push;
        }
    }
}

/// Translates all atoms so their mean position sits on `center`.
#[derive(Debug, Clone)]
pub struct CenterForce {
    center: Point2<f64>,
}

impl CenterForce {
    pub fn new(center: Point2<f64>) -> Self {
        Self { center }
    }
}

impl Force for CenterForce {
    fn initialize(&mut self, _nodes: &[Node], _links: &[Link]) {}

    fn apply(&mut self, nodes: &mut [Node], _links: &[Link], _alpha: f64, _jiggle: &mut Jiggle) {
        if nodes.is_empty() {
            return;
        }
        let sum = nodes
            .iter()
            .fold(Vector2::zeros(), |acc, node| acc + node.point().coords);
        let shift = sum / nodes.len() as f64 - self.center.coords;
        for node in nodes.iter_mut() {
            node.position = Some(node.point() - shift);
        }
    }
}
