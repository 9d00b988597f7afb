//! Layout input and output keyed by external vertex ids.

use gem_graph::{Graph, Limits, VertexId};
use indexmap::IndexMap;
use nalgebra::Vector2;
use rustc_hash::{FxBuildHasher, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gem::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// One vertex description: its external id, an optional starting position and the ids of the
/// vertices it is connected to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub neighbors: Vec<String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: None,
            neighbors: Vec::new(),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point { x, y });
        self
    }

    pub fn with_neighbors<I, S>(mut self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neighbors.extend(neighbors.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub nodes: Vec<NodeRecord>,
}

/// A dense graph built from an [`Input`], plus the starting position of every vertex.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub graph: Graph,
    pub initial: Vec<Option<Point>>,
}

impl Input {
    pub fn build(&self) -> Result<Prepared> {
        self.build_with_limits(Limits::default())
    }

    /// Maps external ids to `1..=N` in first-seen order (a neighbor reference counts as a
    /// sighting) and adds every unordered pair once. Self-references are dropped.
    pub fn build_with_limits(&self, limits: Limits) -> Result<Prepared> {
        let mut ids: IndexMap<&str, Option<Point>, FxBuildHasher> = IndexMap::default();
        for record in &self.nodes {
            let slot = ids.entry(record.id.as_str()).or_insert(None);
            if slot.is_none() {
                *slot = record.position;
            }
            for n in &record.neighbors {
                ids.entry(n.as_str()).or_insert(None);
            }
        }

        let mut pairs: Vec<(usize, usize)> = Vec::new();
        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        for record in &self.nodes {
            let Some(a) = ids.get_index_of(record.id.as_str()) else {
                continue;
            };
            for n in &record.neighbors {
                let Some(b) = ids.get_index_of(n.as_str()) else {
                    continue;
                };
                if a == b {
                    continue;
                }
                if seen.insert((a.min(b), a.max(b))) {
                    pairs.push((a, b));
                }
            }
        }

        let mut graph = Graph::with_limits(limits);
        graph.create(ids.len(), pairs.len())?;
        for id in ids.keys() {
            graph.add_labeled_vertex(*id)?;
        }
        for (a, b) in pairs {
            graph.add_edge(VertexId::from_index(a), VertexId::from_index(b))?;
        }
        Ok(Prepared {
            graph,
            initial: ids.into_values().collect(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutResult {
    pub positions: IndexMap<String, Point>,
    pub heat: IndexMap<String, f64>,
    /// `None` when the input had no vertices.
    pub report: Option<RunReport>,
}
