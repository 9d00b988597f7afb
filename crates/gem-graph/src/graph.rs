//! Undirected graph container.
//!
//! Vertices are numbered `1..=N` and edges `1..=M`. Each edge is stored once as a pair of
//! endpoints; every vertex owns the list of half-edges leaving it, so walking a vertex's list
//! visits each incident edge once from that side without duplicating edge storage.

use rustc_hash::FxBuildHasher;

use crate::error::{Error, Result};

mod adjacency;
mod entries;
mod ids;
mod options;

pub use adjacency::Adjacency;
pub use ids::{EdgeId, HalfEdge, VertexId};
pub use options::Limits;

use entries::{EdgeEntry, VertexEntry};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    limits: Limits,
    vertices: Vec<VertexEntry>,
    edges: Vec<EdgeEntry>,
    label_index: HashMap<String, VertexId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Resets the graph and reserves room for `n` vertices and `m` edges.
    pub fn create(&mut self, n: usize, m: usize) -> Result<()> {
        if n > self.limits.max_vertices {
            return Err(Error::CapacityExceeded {
                what: "vertices",
                limit: self.limits.max_vertices,
            });
        }
        if m > self.limits.max_edges {
            return Err(Error::CapacityExceeded {
                what: "edges",
                limit: self.limits.max_edges,
            });
        }
        self.clear();
        self.vertices.reserve(n);
        self.edges.reserve(m);
        self.label_index.reserve(n);
        Ok(())
    }

    /// Drops every vertex and edge, keeping the limits and allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.label_index.clear();
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Appends an isolated vertex labelled with its own number.
    pub fn add_vertex(&mut self) -> Result<VertexId> {
        let label = (self.vertices.len() + 1).to_string();
        self.add_labeled_vertex(label)
    }

    pub fn add_labeled_vertex(&mut self, label: impl Into<String>) -> Result<VertexId> {
        if self.vertices.len() >= self.limits.max_vertices {
            return Err(Error::CapacityExceeded {
                what: "vertices",
                limit: self.limits.max_vertices,
            });
        }
        let v = VertexId::from_index(self.vertices.len());
        let label = label.into();
        self.label_index.entry(label.clone()).or_insert(v);
        self.vertices.push(VertexEntry {
            label,
            incident: Vec::new(),
        });
        Ok(v)
    }

    /// Connects `v` and `w`. The forward half-edge is threaded onto `v`, the backward one onto `w`.
    pub fn add_edge(&mut self, v: VertexId, w: VertexId) -> Result<EdgeId> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;
        if self.edges.len() >= self.limits.max_edges {
            return Err(Error::CapacityExceeded {
                what: "edges",
                limit: self.limits.max_edges,
            });
        }
        let e = EdgeId::from_index(self.edges.len());
        self.edges.push(EdgeEntry { a: v, b: w });
        self.vertices[v.index()].incident.push(e.forward());
        self.vertices[w.index()].incident.push(e.backward());
        Ok(e)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = VertexId> + Clone + use<> {
        (0..self.vertices.len()).map(VertexId::from_index)
    }

    /// `(id, first endpoint, second endpoint)` for every edge, in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, VertexId, VertexId)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId::from_index(i), e.a, e.b))
    }

    pub fn endpoints(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges.get(e.index()).map(|entry| (entry.a, entry.b))
    }

    /// The vertex reached by following `h`.
    ///
    /// # Panics
    ///
    /// Panics if `h` belongs to an edge of another graph.
    pub fn destination(&self, h: HalfEdge) -> VertexId {
        let entry = &self.edges[h.edge.index()];
        if h.reversed { entry.a } else { entry.b }
    }

    /// The vertex `h` leaves from.
    pub fn origin(&self, h: HalfEdge) -> VertexId {
        self.destination(h.twin())
    }

    /// Half-edges leaving `v`. Empty for vertices outside the graph.
    pub fn half_edges(&self, v: VertexId) -> &[HalfEdge] {
        self.vertices
            .get(v.index())
            .map(|entry| entry.incident.as_slice())
            .unwrap_or(&[])
    }

    pub fn adjacency(&self, v: VertexId) -> Adjacency<'_> {
        Adjacency {
            graph: self,
            half_edges: self.half_edges(v).iter(),
        }
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.half_edges(v).len()
    }

    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.vertices.get(v.index()).map(|entry| entry.label.as_str())
    }

    /// First vertex carrying `label`.
    pub fn find_vertex(&self, label: &str) -> Option<VertexId> {
        self.label_index.get(label).copied()
    }

    fn check_vertex(&self, v: VertexId) -> Result<()> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(Error::UnknownVertex(v))
        }
    }
}
