//! Lazy adjacency walks used by [`Graph::adjacency`](super::Graph::adjacency).

use super::{Graph, HalfEdge, VertexId};

/// Neighbors of one vertex, produced by walking its half-edge list.
///
/// The walk borrows the graph and is `Clone`, so a caller can restart it from any point.
#[derive(Debug, Clone)]
pub struct Adjacency<'a> {
    pub(in crate::graph) graph: &'a Graph,
    pub(in crate::graph) half_edges: std::slice::Iter<'a, HalfEdge>,
}

impl Iterator for Adjacency<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let h = *self.half_edges.next()?;
        Some(self.graph.destination(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.half_edges.size_hint()
    }
}

impl ExactSizeIterator for Adjacency<'_> {}
