//! Internal storage entries for [`Graph`](super::Graph).

use super::{HalfEdge, VertexId};

#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexEntry {
    pub(in crate::graph) label: String,
    /// Half-edges leaving this vertex, in insertion order.
    pub(in crate::graph) incident: Vec<HalfEdge>,
}

#[derive(Debug, Clone, Copy)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) a: VertexId,
    pub(in crate::graph) b: VertexId,
}
