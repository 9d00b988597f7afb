//! Graph capacity limits.

/// Upper bounds on the number of vertices and edges a [`Graph`](super::Graph) accepts.
///
/// Storage grows on demand; the limits only decide when growth is refused with
/// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_vertices: usize,
    pub max_edges: usize,
}

impl Limits {
    /// Ids are stored as `u32`, which bounds both counts.
    pub const UNBOUNDED: Self = Self {
        max_vertices: u32::MAX as usize,
        max_edges: u32::MAX as usize,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
