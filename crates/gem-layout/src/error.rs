#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] gem_graph::Error),

    #[error("graph has no vertices; nothing to lay out")]
    EmptyGraph,

    #[error("expected {expected} initial positions, got {actual}")]
    InitialPositionCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
