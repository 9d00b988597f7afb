use crate::graph::VertexId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("graph capacity exceeded: more than {limit} {what}")]
    CapacityExceeded { what: &'static str, limit: usize },

    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(VertexId),
}

pub type Result<T> = std::result::Result<T, Error>;
