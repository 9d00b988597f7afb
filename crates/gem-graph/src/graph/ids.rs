//! Vertex, edge and half-edge identifiers.
//!
//! Vertices and edges are numbered densely from 1. Every undirected edge has two directed views
//! ("half-edges"): the forward view leaves the first endpoint, the backward view leaves the
//! second one.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

impl VertexId {
    /// Builds an id from its 1-based number. Returns `None` for 0.
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 0-based slot of this vertex in per-vertex tables.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn forward(self) -> HalfEdge {
        HalfEdge {
            edge: self,
            reversed: false,
        }
    }

    pub fn backward(self) -> HalfEdge {
        HalfEdge {
            edge: self,
            reversed: true,
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directed view of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfEdge {
    pub edge: EdgeId,
    pub reversed: bool,
}

impl HalfEdge {
    pub fn twin(self) -> Self {
        Self {
            edge: self.edge,
            reversed: !self.reversed,
        }
    }

    /// Signed view number: `+e` leaves the first endpoint, `-e` leaves the second.
    pub fn signed(self) -> i64 {
        let e = i64::from(self.edge.get());
        if self.reversed { -e } else { e }
    }
}
