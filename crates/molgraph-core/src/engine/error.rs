use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::json::IngestError;
use crate::core::models::ids::{ElementId, NodeId};

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("Failed to ingest diagram data: {source}")]
    Ingest {
        #[from]
        source: IngestError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Atom not found in diagram: {0}")]
    NodeNotFound(NodeId),

    #[error("Element {0:?} does not belong to an atom")]
    NotAnAtom(ElementId),
}
