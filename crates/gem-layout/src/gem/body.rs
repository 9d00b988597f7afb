//! Per-vertex physical state and the shared displacement step.

use nalgebra::Vector2;

use crate::config::PhaseConfig;

/// Lowest heat a vertex can cool down to.
pub const HEAT_FLOOR: f64 = 2.0;

/// Impulse components above this multiple of the edge length are scaled down before use.
const IMPULSE_LIMIT_FACTOR: f64 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector2<f64>,
    /// `1 + degree / 3`, refreshed when a phase starts.
    pub mass: f64,
    pub heat: f64,
    /// Displacement applied by the previous step.
    pub impulse: Vector2<f64>,
    /// Accumulated rotation; cools vertices that circle instead of settling.
    pub direction_bias: f64,
}

impl Body {
    pub fn at(position: Vector2<f64>) -> Self {
        Self {
            position,
            mass: 1.0,
            heat: HEAT_FLOOR,
            impulse: Vector2::zeros(),
            direction_bias: 0.0,
        }
    }
}

/// Bookkeeping for one phase invocation.
///
/// `system_temperature` and `center` are maintained incrementally by every position or heat
/// change, so a displacement costs O(1).
#[derive(Debug, Clone)]
pub(crate) struct Simulation {
    /// Sum of squared heats over all vertices.
    pub(crate) system_temperature: f64,
    /// Sum of all positions.
    pub(crate) center: Vector2<f64>,
    pub(crate) max_heat: f64,
    pub(crate) oscillation: f64,
    pub(crate) rotation: f64,
    pub(crate) gravity: f64,
    pub(crate) shake: f64,
    pub(crate) edge_length: f64,
    pub(crate) vertex_count: f64,
}

impl Simulation {
    /// Resets every body for a new phase and returns the phase's bookkeeping.
    pub(crate) fn begin(
        bodies: &mut [Body],
        degrees: impl Iterator<Item = usize>,
        params: &PhaseConfig,
        edge_length: f64,
    ) -> Self {
        let max_heat = (params.max_temperature * edge_length).max(HEAT_FLOOR);
        let heat = (params.start_temperature * edge_length).clamp(HEAT_FLOOR, max_heat);
        let mut center = Vector2::zeros();
        for (body, degree) in bodies.iter_mut().zip(degrees) {
            body.heat = heat;
            body.impulse = Vector2::zeros();
            body.direction_bias = 0.0;
            body.mass = 1.0 + degree as f64 / 3.0;
            center += body.position;
        }
        Self {
            system_temperature: bodies.iter().map(|b| b.heat * b.heat).sum(),
            center,
            max_heat,
            oscillation: params.oscillation,
            rotation: params.rotation,
            gravity: params.gravity,
            shake: params.shake,
            edge_length,
            vertex_count: bodies.len() as f64,
        }
    }

    pub(crate) fn centroid(&self) -> Vector2<f64> {
        if self.vertex_count > 0.0 {
            self.center / self.vertex_count
        } else {
            Vector2::zeros()
        }
    }

    /// Teleports a body, keeping the center-of-mass sum in step.
    pub(crate) fn place(&mut self, body: &mut Body, position: Vector2<f64>) {
        self.center += position - body.position;
        body.position = position;
    }

    /// Moves `body` by exactly its heat along `impulse`, then adapts its heat.
    ///
    /// Heat grows when the move continues the previous one and shrinks when it reverses it
    /// (scaled by `oscillation`). Sideways moves feed `direction_bias` (scaled by `rotation`),
    /// which cools the vertex in proportion to `|bias| / V`. The result is clamped into
    /// `[HEAT_FLOOR, max_heat]`.
    pub(crate) fn displace(&mut self, body: &mut Body, impulse: Vector2<f64>) {
        let mut impulse = impulse;
        let peak = impulse.x.abs().max(impulse.y.abs()) / (IMPULSE_LIMIT_FACTOR * self.edge_length);
        if !peak.is_finite() {
            return;
        }
        if peak > 1.0 {
            impulse /= peak;
        }
        let len = impulse.norm();
        if len == 0.0 {
            return;
        }

        let t = body.heat;
        let step = impulse * (t / len);
        body.position += step;
        self.center += step;

        let previous = t * body.impulse.norm();
        let (alignment, turn) = if previous > 0.0 {
            (
                step.dot(&body.impulse) / previous,
                step.perp(&body.impulse) / previous,
            )
        } else {
            (0.0, 0.0)
        };

        let mut heat = t + t * self.oscillation * alignment;
        heat = heat.min(self.max_heat);
        body.direction_bias += self.rotation * turn;
        heat -= heat * body.direction_bias.abs() / self.vertex_count;
        heat = heat.max(HEAT_FLOOR);

        self.system_temperature += heat * heat - t * t;
        body.heat = heat;
        body.impulse = step;
    }
}
