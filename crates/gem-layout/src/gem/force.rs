//! Impulse computation for the three placement regimes.
//!
//! Every regime starts from the same base: a random shake bounded by `shake * edge_length` on
//! each axis plus a pull towards the center of mass proportional to mass and gravity. The
//! regimes differ in which repulsion and attraction terms they add.

use gem_graph::{Graph, VertexId};
use nalgebra::Vector2;

use super::body::{Body, Simulation};
use super::rng::XorShift64Star;

/// Cap on `distance^2 / mass` in the attraction term, in units of `edge_length^2`.
const MAX_ATTRACTION: f64 = 64.0;

/// Within this many `edge_length^2` of an edge midpoint, the optimization regime measures the
/// exact distance to the segment instead of the distance to the midpoint.
const SEGMENT_PRECISION_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Regime {
    /// Repulsion and attraction only against placed vertices.
    Insertion,
    /// Repulsion against all vertices, attraction along incident edges.
    Arrangement,
    /// Repulsion from non-incident edges, attraction along incident edges.
    Optimization,
}

pub(crate) struct ForceModel<'a> {
    pub(crate) graph: &'a Graph,
    pub(crate) bodies: &'a [Body],
    pub(crate) sim: &'a Simulation,
    /// Placement markers; a positive value means the vertex is placed. Only used by insertion.
    pub(crate) placed: &'a [i64],
}

impl ForceModel<'_> {
    pub(crate) fn impulse(
        &self,
        regime: Regime,
        v: VertexId,
        rng: &mut XorShift64Star,
    ) -> Vector2<f64> {
        let base = self.shake_and_gravity(v, rng);
        match regime {
            Regime::Insertion => base + self.insertion_terms(v),
            Regime::Arrangement => base + self.arrangement_terms(v),
            Regime::Optimization => base + self.optimization_terms(v),
        }
    }

    fn shake_and_gravity(&self, v: VertexId, rng: &mut XorShift64Star) -> Vector2<f64> {
        let body = &self.bodies[v.index()];
        let amplitude = self.sim.shake * self.sim.edge_length;
        let shake = Vector2::new(
            rng.symmetric() * amplitude,
            rng.symmetric() * amplitude,
        );
        shake + (self.sim.centroid() - body.position) * (body.mass * self.sim.gravity)
    }

    fn edge_length_sq(&self) -> f64 {
        self.sim.edge_length * self.sim.edge_length
    }

    /// Inverse-distance push away from `from`.
    fn repulsion(&self, at: Vector2<f64>, from: Vector2<f64>) -> Vector2<f64> {
        let d = at - from;
        let n = d.norm_squared();
        if n > 0.0 {
            d * (self.edge_length_sq() / n)
        } else {
            Vector2::zeros()
        }
    }

    /// Pull towards `to`, growing with the cube of the distance up to a cap.
    fn attraction(&self, body: &Body, to: Vector2<f64>) -> Vector2<f64> {
        let d = body.position - to;
        let l2 = self.edge_length_sq();
        let n = (d.norm_squared() / body.mass).min(MAX_ATTRACTION * l2);
        -d * (n / l2)
    }

    fn insertion_terms(&self, v: VertexId) -> Vector2<f64> {
        let body = &self.bodies[v.index()];
        let mut impulse = Vector2::zeros();
        for u in self.graph.vertices() {
            if u != v && self.placed[u.index()] > 0 {
                impulse += self.repulsion(body.position, self.bodies[u.index()].position);
            }
        }
        for u in self.graph.adjacency(v) {
            if u != v && self.placed[u.index()] > 0 {
                impulse += self.attraction(body, self.bodies[u.index()].position);
            }
        }
        impulse
    }

    fn arrangement_terms(&self, v: VertexId) -> Vector2<f64> {
        let body = &self.bodies[v.index()];
        let mut impulse = Vector2::zeros();
        for (i, other) in self.bodies.iter().enumerate() {
            if i != v.index() {
                impulse += self.repulsion(body.position, other.position);
            }
        }
        for u in self.graph.adjacency(v) {
            if u != v {
                impulse += self.attraction(body, self.bodies[u.index()].position);
            }
        }
        impulse
    }

    fn optimization_terms(&self, v: VertexId) -> Vector2<f64> {
        let body = &self.bodies[v.index()];
        let radius = SEGMENT_PRECISION_RADIUS * self.edge_length_sq();
        let mut impulse = Vector2::zeros();
        for (_, a, b) in self.graph.edges() {
            if a == v || b == v {
                continue;
            }
            let pa = self.bodies[a.index()].position;
            let pb = self.bodies[b.index()].position;
            let mid = (pa + pb) * 0.5;
            let nearest = if (body.position - mid).norm_squared() < radius {
                nearest_on_segment(body.position, pa, pb)
            } else {
                mid
            };
            impulse += self.repulsion(body.position, nearest);
        }
        for u in self.graph.adjacency(v) {
            if u != v {
                impulse += self.attraction(body, self.bodies[u.index()].position);
            }
        }
        impulse
    }
}

/// Closest point to `p` on the segment `a..b`.
fn nearest_on_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}
