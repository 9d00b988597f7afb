//! Graph searches: resumable BFS/DFS traversals and the distance measures built on them.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    BreadthFirst,
    DepthFirst,
}

/// A traversal that yields one visited vertex per [`step`](Traversal::step).
///
/// Every discovered vertex gets a depth label: the root is 1 and a vertex discovered from `v`
/// gets `depth(v) + 1`. Undiscovered vertices keep the label 0.
#[derive(Debug, Clone)]
pub struct Traversal<'g> {
    graph: &'g Graph,
    order: Order,
    frontier: VecDeque<VertexId>,
    depth: Vec<u32>,
    max_depth: u32,
}

impl<'g> Traversal<'g> {
    pub fn new(graph: &'g Graph, order: Order, root: VertexId) -> Result<Self> {
        let mut traversal = Self {
            graph,
            order,
            frontier: VecDeque::new(),
            depth: vec![0; graph.vertex_count()],
            max_depth: 0,
        };
        traversal.restart(root)?;
        Ok(traversal)
    }

    pub fn breadth_first(graph: &'g Graph, root: VertexId) -> Result<Self> {
        Self::new(graph, Order::BreadthFirst, root)
    }

    pub fn depth_first(graph: &'g Graph, root: VertexId) -> Result<Self> {
        Self::new(graph, Order::DepthFirst, root)
    }

    /// Forgets every label and starts over from `root`.
    pub fn restart(&mut self, root: VertexId) -> Result<()> {
        if !self.graph.contains(root) {
            return Err(Error::UnknownVertex(root));
        }
        self.depth.fill(0);
        self.frontier.clear();
        self.depth[root.index()] = 1;
        self.max_depth = 1;
        self.frontier.push_back(root);
        Ok(())
    }

    /// Visits the next vertex, or returns `None` once the component of the root is exhausted.
    pub fn step(&mut self) -> Option<VertexId> {
        let v = match self.order {
            Order::BreadthFirst => self.frontier.pop_front()?,
            Order::DepthFirst => self.frontier.pop_back()?,
        };
        let next = self.depth[v.index()] + 1;
        for u in self.graph.adjacency(v) {
            let slot = &mut self.depth[u.index()];
            if *slot == 0 {
                *slot = next;
                self.max_depth = self.max_depth.max(next);
                self.frontier.push_back(u);
            }
        }
        Some(v)
    }

    /// Depth label of `v`, 0 when `v` has not been discovered.
    pub fn depth(&self, v: VertexId) -> u32 {
        self.depth.get(v.index()).copied().unwrap_or(0)
    }

    /// Largest label handed out so far.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

impl Iterator for Traversal<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// Largest hop distance from `v` to any vertex reachable from it.
pub fn eccentricity(graph: &Graph, v: VertexId) -> Result<u32> {
    let mut bfs = Traversal::breadth_first(graph, v)?;
    while bfs.step().is_some() {}
    Ok(bfs.max_depth() - 1)
}

/// Vertex of minimum eccentricity; ties go to the lowest id. `None` for an empty graph.
///
/// Runs one BFS per vertex, abandoning a root as soon as it reaches the best depth seen so far.
pub fn center(graph: &Graph) -> Option<VertexId> {
    let mut roots = graph.vertices();
    let first = roots.next()?;
    let mut bfs = Traversal::breadth_first(graph, first).ok()?;
    let mut best: Option<(VertexId, u32)> = None;
    for w in std::iter::once(first).chain(roots) {
        if w != first {
            bfs.restart(w).ok()?;
        }
        let bound = best.map_or(u32::MAX, |(_, depth)| depth);
        let mut pruned = false;
        while let Some(v) = bfs.step() {
            if bfs.depth(v) >= bound {
                pruned = true;
                break;
            }
        }
        if !pruned && bfs.max_depth() < bound {
            best = Some((w, bfs.max_depth()));
        }
    }
    best.map(|(v, _)| v)
}

/// Largest eccentricity over all vertices; 0 for an empty graph.
pub fn diameter(graph: &Graph) -> u32 {
    let mut diameter = 0;
    for w in graph.vertices() {
        if let Ok(e) = eccentricity(graph, w) {
            diameter = diameter.max(e);
        }
    }
    diameter
}

/// Connected components, each listed in BFS order, components ordered by their lowest vertex.
pub fn components(graph: &Graph) -> Vec<Vec<VertexId>> {
    let mut seen = vec![false; graph.vertex_count()];
    let mut out: Vec<Vec<VertexId>> = Vec::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    for start in graph.vertices() {
        if seen[start.index()] {
            continue;
        }
        seen[start.index()] = true;
        queue.push_back(start);
        let mut component: Vec<VertexId> = Vec::new();
        while let Some(v) = queue.pop_front() {
            component.push(v);
            for u in graph.adjacency(v) {
                if !seen[u.index()] {
                    seen[u.index()] = true;
                    queue.push_back(u);
                }
            }
        }
        out.push(component);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(leaves: usize) -> Graph {
        let mut g = Graph::new();
        let hub = g.add_vertex().unwrap();
        for _ in 0..leaves {
            let leaf = g.add_vertex().unwrap();
            g.add_edge(hub, leaf).unwrap();
        }
        g
    }

    #[test]
    fn pruned_roots_never_replace_the_center() {
        // Every leaf reaches depth 3 while the hub stops at 2; pruning must not let a leaf win.
        let g = star(4);
        assert_eq!(center(&g).map(VertexId::get), Some(1));
    }

    #[test]
    fn restart_clears_previous_labels() {
        let g = star(2);
        let hub = VertexId::new(1).unwrap();
        let leaf = VertexId::new(2).unwrap();
        let mut bfs = Traversal::breadth_first(&g, hub).unwrap();
        while bfs.step().is_some() {}
        assert_eq!(bfs.depth(leaf), 2);

        bfs.restart(leaf).unwrap();
        assert_eq!(bfs.depth(leaf), 1);
        assert_eq!(bfs.depth(hub), 0);
        assert_eq!(bfs.max_depth(), 1);
    }
}
