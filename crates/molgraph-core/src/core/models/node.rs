use super::ids::NodeId;
use crate::core::reconcile::Entity;
use nalgebra::{Point2, Vector2};

/// Size hint used when a node does not declare one.
pub const DEFAULT_NODE_SIZE: f64 = 1.5;

/// An atom of the diagram.
///
/// The display attributes (`atom`, `size`, `color`) come from the external data
/// source and are replaced on every update. The simulation state (`position`,
/// `velocity`) belongs to the layout engine once a simulation has started and
/// survives updates through [`merge`](crate::core::reconcile::merge).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable identity of the atom.
    pub id: NodeId,
    /// The atom label, typically an element symbol (e.g., "C", "O").
    pub atom: String,
    /// Size hint driving the circle radius; [`DEFAULT_NODE_SIZE`] when absent.
    pub size: Option<f64>,
    /// Explicit fill color; the renderer default is used when absent.
    pub color: Option<String>,
    /// Current layout position. `None` until the layout engine places the node.
    pub position: Option<Point2<f64>>,
    /// Current layout velocity.
    pub velocity: Vector2<f64>,
}

impl Node {
    /// Creates a node with no size, color or position.
    pub fn new(id: impl Into<NodeId>, atom: &str) -> Self {
        Self {
            id: id.into(),
            atom: atom.to_string(),
            size: None,
            color: None,
            position: None,
            velocity: Vector2::zeros(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point2::new(x, y));
        self
    }

    /// The current position, or the origin when the node has not been placed yet.
    #[inline]
    pub fn point(&self) -> Point2<f64> {
        self.position.unwrap_or_else(Point2::origin)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.point().x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.point().y
    }

    pub fn size_or_default(&self) -> f64 {
        self.size.unwrap_or(DEFAULT_NODE_SIZE)
    }
}

impl Entity for Node {
    type Id = NodeId;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn assign(&mut self, incoming: Self) {
        self.id = incoming.id;
        self.atom = incoming.atom;
        self.size = incoming.size;
        self.color = incoming.color;
    }
}
