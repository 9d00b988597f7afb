#![forbid(unsafe_code)]

//! Graph store and graph searches for the GEM force-directed embedder.
//!
//! The store keeps an undirected graph with dense `1..=N` vertex numbering and per-vertex
//! half-edge lists. [`search`] provides resumable BFS/DFS walks plus eccentricity, center and
//! diameter.

pub mod error;
pub mod graph;
pub mod search;

pub use error::{Error, Result};
pub use graph::{Adjacency, EdgeId, Graph, HalfEdge, Limits, VertexId};
pub use search::{Order, Traversal};
