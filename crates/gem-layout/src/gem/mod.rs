//! GEM embedder: incremental insertion, global arrangement and edge-aware optimization.
//!
//! Each vertex carries its own temperature ("heat") which bounds the length of its next move.
//! Heat rises while a vertex keeps moving in one direction and falls when it oscillates or
//! rotates, so every vertex anneals at its own pace. The phases run in order
//! `Inserting -> Arranging -> Optimizing`; a phase whose final temperature is not below its start
//! temperature is skipped.

use gem_graph::{Graph, VertexId, search};
use nalgebra::Vector2;
use serde::Serialize;

use crate::config::{GemConfig, PhaseConfig};
use crate::error::{Error, Result};
use crate::graph::Point;

mod body;
mod cancel;
mod force;
mod rng;
mod select;

pub use body::{Body, HEAT_FLOOR};
pub use cancel::{Cancel, CancelToken, Never};

use body::Simulation;
use force::{ForceModel, Regime};
use rng::XorShift64Star;
use select::RoundSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Inserting,
    Arranging,
    Optimizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Displacement steps performed.
    pub steps: u64,
    /// Completed rounds of `V` steps; always 0 for insertion.
    pub rounds: u64,
    pub final_system_temperature: f64,
    pub cancelled: bool,
    pub skipped: bool,
}

impl PhaseReport {
    fn skipped(phase: Phase) -> Self {
        Self {
            phase,
            steps: 0,
            rounds: 0,
            final_system_temperature: 0.0,
            cancelled: false,
            skipped: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunReport {
    pub insertion: PhaseReport,
    pub arrangement: PhaseReport,
    pub optimization: PhaseReport,
    pub total_steps: u64,
}

/// Force-directed placement over a borrowed graph.
///
/// The embedder owns the per-vertex [`Body`] table; positions survive between phases and can
/// be read back with [`positions`](Embedder::positions) once the run is over.
#[derive(Debug, Clone)]
pub struct Embedder<'g> {
    graph: &'g Graph,
    config: GemConfig,
    bodies: Vec<Body>,
    rng: XorShift64Star,
    phase: Phase,
    iteration_count: u64,
    /// Relaxation steps counted against the iteration budget. Arrangement resets it and
    /// optimization continues from where arrangement stopped.
    relaxation_steps: u64,
}

impl<'g> Embedder<'g> {
    /// All vertices start at the origin.
    pub fn new(graph: &'g Graph, config: GemConfig) -> Self {
        let rng = XorShift64Star::new(config.random_seed);
        Self {
            graph,
            bodies: vec![Body::at(Vector2::zeros()); graph.vertex_count()],
            config,
            rng,
            phase: Phase::Idle,
            iteration_count: 0,
            relaxation_steps: 0,
        }
    }

    /// Starts from the given positions; `None` entries start at the origin.
    pub fn with_positions(
        graph: &'g Graph,
        config: GemConfig,
        initial: &[Option<Point>],
    ) -> Result<Self> {
        if initial.len() != graph.vertex_count() {
            return Err(Error::InitialPositionCount {
                expected: graph.vertex_count(),
                actual: initial.len(),
            });
        }
        let mut embedder = Self::new(graph, config);
        for (body, p) in embedder.bodies.iter_mut().zip(initial) {
            if let Some(p) = p {
                body.position = Vector2::new(p.x, p.y);
            }
        }
        Ok(embedder)
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn config(&self) -> &GemConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Displacement steps taken across all phases so far.
    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    pub fn position(&self, v: VertexId) -> Option<Point> {
        self.bodies.get(v.index()).map(|b| Point::from(b.position))
    }

    pub fn positions(&self) -> Vec<Point> {
        self.bodies.iter().map(|b| Point::from(b.position)).collect()
    }

    pub fn heat(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.heat).collect()
    }

    /// Runs insertion (or a random start when `random_start` is set), arrangement and
    /// optimization in order.
    ///
    /// `cancel` is polled once per relaxation round and only ends the phase it interrupts.
    pub fn run(&mut self, cancel: &mut impl Cancel) -> Result<RunReport> {
        if self.graph.is_empty() {
            tracing::warn!("skipping layout of an empty graph");
            return Err(Error::EmptyGraph);
        }
        let before = self.iteration_count;
        let insertion = if self.config.random_start {
            self.randomize();
            PhaseReport::skipped(Phase::Inserting)
        } else {
            self.insert()
        };
        let arrangement = self.arrange(cancel);
        let optimization = self.optimize(cancel);
        Ok(RunReport {
            insertion,
            arrangement,
            optimization,
            total_steps: self.iteration_count - before,
        })
    }

    /// Scatters every vertex uniformly over the square `[-s, s)^2` with
    /// `s = edge_length * sqrt(V) / 2`.
    pub fn randomize(&mut self) {
        let half = self.config.edge_length * (self.bodies.len() as f64).sqrt() / 2.0;
        for body in &mut self.bodies {
            body.position = Vector2::new(self.rng.symmetric() * half, self.rng.symmetric() * half);
        }
        tracing::debug!(vertices = self.bodies.len(), half, "random start");
    }

    /// Places vertices one at a time, most-connected-to-the-drawing first, starting from the
    /// graph center.
    pub fn insert(&mut self) -> PhaseReport {
        let params = self.config.insertion;
        if !params.is_enabled() || self.graph.is_empty() {
            return PhaseReport::skipped(Phase::Inserting);
        }
        let Some(center) = search::center(self.graph) else {
            return PhaseReport::skipped(Phase::Inserting);
        };

        self.phase = Phase::Inserting;
        let span = tracing::debug_span!("insert", vertices = self.graph.vertex_count());
        let _guard = span.enter();

        let mut sim = self.begin(&params);
        let graph = self.graph;
        let stop_heat = params.final_temperature * self.config.edge_length;
        // 0: untouched, < 0: next to -marker placed vertices, > 0: placed.
        let mut markers = vec![0i64; graph.vertex_count()];
        markers[center.index()] = -1;
        let mut steps = 0u64;

        for n in 0..graph.vertex_count() {
            let Some(v) = next_insertion(&markers) else {
                break;
            };
            markers[v.index()] = 1;
            for u in graph.adjacency(v) {
                if markers[u.index()] <= 0 {
                    markers[u.index()] -= 1;
                }
            }

            let mut sum = Vector2::zeros();
            let mut placed_neighbors = 0usize;
            for u in graph.adjacency(v) {
                if u != v && markers[u.index()] > 0 {
                    sum += self.bodies[u.index()].position;
                    placed_neighbors += 1;
                }
            }
            let start = if placed_neighbors > 0 {
                sum / placed_neighbors as f64
            } else {
                Vector2::zeros()
            };
            sim.place(&mut self.bodies[v.index()], start);

            if n == 0 {
                continue;
            }
            let mut tries = 0;
            while tries < params.max_iterations && self.bodies[v.index()].heat > stop_heat {
                self.step(&mut sim, Regime::Insertion, v, &markers);
                tries += 1;
                steps += 1;
            }
        }

        self.iteration_count += steps;
        self.phase = Phase::Idle;
        tracing::debug!(steps, temperature = sim.system_temperature, "insertion done");
        PhaseReport {
            phase: Phase::Inserting,
            steps,
            rounds: 0,
            final_system_temperature: sim.system_temperature,
            cancelled: false,
            skipped: false,
        }
    }

    /// Global relaxation: repulsion between all vertices, attraction along edges.
    pub fn arrange(&mut self, cancel: &mut impl Cancel) -> PhaseReport {
        self.relax(Phase::Arranging, Regime::Arrangement, cancel)
    }

    /// Local beautification: vertices are pushed off nearby edges they are not part of.
    pub fn optimize(&mut self, cancel: &mut impl Cancel) -> PhaseReport {
        self.relax(Phase::Optimizing, Regime::Optimization, cancel)
    }

    fn relax(&mut self, phase: Phase, regime: Regime, cancel: &mut impl Cancel) -> PhaseReport {
        let Some(&params) = self.config.phase(phase) else {
            return PhaseReport::skipped(phase);
        };
        if !params.is_enabled() || self.graph.is_empty() {
            return PhaseReport::skipped(phase);
        }

        self.phase = phase;
        let span = tracing::debug_span!("relax", ?phase, vertices = self.graph.vertex_count());
        let _guard = span.enter();

        let mut sim = self.begin(&params);
        let n = self.graph.vertex_count() as u64;
        let length = self.config.edge_length;
        let stop_temperature =
            params.final_temperature.powi(2) * length * length * self.graph.vertex_count() as f64;
        let mut stop_iteration = u64::from(params.max_iterations) * n * n;
        let mut selector = RoundSelector::new(self.graph.vertex_count());

        if regime == Regime::Arrangement {
            self.relaxation_steps = 0;
        }
        let start = self.relaxation_steps;
        let mut iteration = start;
        let mut rounds = 0u64;
        let mut cancelled = false;
        while sim.system_temperature > stop_temperature && iteration < stop_iteration {
            for _ in 0..n {
                let Some(v) = selector.next(&mut self.rng) else {
                    break;
                };
                self.step(&mut sim, regime, v, &[]);
                iteration += 1;
            }
            rounds += 1;
            tracing::trace!(rounds, temperature = sim.system_temperature, "round done");
            if cancel.should_cancel() {
                tracing::debug!(rounds, "phase cancelled");
                stop_iteration = iteration;
                cancelled = true;
            }
        }

        let steps = iteration - start;
        self.relaxation_steps = iteration;
        self.iteration_count += steps;
        self.phase = Phase::Idle;
        tracing::debug!(
            steps,
            rounds,
            temperature = sim.system_temperature,
            "relaxation done"
        );
        PhaseReport {
            phase,
            steps,
            rounds,
            final_system_temperature: sim.system_temperature,
            cancelled,
            skipped: false,
        }
    }

    fn begin(&mut self, params: &PhaseConfig) -> Simulation {
        let graph = self.graph;
        Simulation::begin(
            &mut self.bodies,
            graph.vertices().map(|v| graph.degree(v)),
            params,
            self.config.edge_length,
        )
    }

    fn step(&mut self, sim: &mut Simulation, regime: Regime, v: VertexId, markers: &[i64]) {
        let impulse = ForceModel {
            graph: self.graph,
            bodies: &self.bodies,
            sim: &*sim,
            placed: markers,
        }
        .impulse(regime, v, &mut self.rng);
        sim.displace(&mut self.bodies[v.index()], impulse);
    }
}

/// Unplaced vertex with the most negative marker (lowest id on ties), falling back to the
/// lowest untouched vertex when the placed part has no unplaced neighbors left.
fn next_insertion(markers: &[i64]) -> Option<VertexId> {
    let mut best: Option<(usize, i64)> = None;
    for (i, &m) in markers.iter().enumerate() {
        if m < best.map_or(0, |(_, b)| b) {
            best = Some((i, m));
        }
    }
    best.map(|(i, _)| i)
        .or_else(|| markers.iter().position(|&m| m == 0))
        .map(VertexId::from_index)
}
