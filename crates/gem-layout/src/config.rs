//! Embedder configuration and the named-key parameter loader.
//!
//! Every parameter has a dotted key (`edge_length`, `seed`, `insertion.start_temperature`,
//! `arrangement.max_iterations`, ...) and an inclusive valid range. Out-of-range or unknown
//! entries are rejected with a warning and the previous value stays in effect.

use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::Value;

use crate::gem::Phase;

/// Parameters of one placement phase. Temperatures are in units of the reference edge length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseConfig {
    pub start_temperature: f64,
    /// The phase stops once the average heat falls to this level. A phase whose final
    /// temperature is not below its start temperature is skipped.
    pub final_temperature: f64,
    pub max_temperature: f64,
    /// Iteration budget factor: insertion allows this many steps per inserted vertex, the
    /// relaxation phases allow `max_iterations * V^2` steps.
    pub max_iterations: u32,
    pub gravity: f64,
    pub oscillation: f64,
    pub rotation: f64,
    pub shake: f64,
}

impl PhaseConfig {
    pub const INSERTION: Self = Self {
        start_temperature: 0.3,
        final_temperature: 0.05,
        max_temperature: 1.0,
        max_iterations: 10,
        gravity: 0.05,
        oscillation: 0.4,
        rotation: 0.5,
        shake: 0.2,
    };

    pub const ARRANGEMENT: Self = Self {
        start_temperature: 1.0,
        final_temperature: 0.02,
        max_temperature: 1.5,
        max_iterations: 3,
        gravity: 0.1,
        oscillation: 0.4,
        rotation: 0.9,
        shake: 0.3,
    };

    pub const OPTIMIZATION: Self = Self {
        start_temperature: 1.0,
        final_temperature: 1.0,
        max_temperature: 0.25,
        max_iterations: 3,
        gravity: 0.1,
        oscillation: 0.4,
        rotation: 0.3,
        shake: 0.3,
    };

    pub fn is_enabled(&self) -> bool {
        self.final_temperature < self.start_temperature
    }

    /// A configuration that makes the phase a no-op.
    pub fn disabled(mut self) -> Self {
        self.final_temperature = self.start_temperature;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GemConfig {
    /// Reference ("ideal") edge length all force magnitudes are normalized against.
    pub edge_length: f64,
    /// Seed for the jitter and vertex-selection generator.
    pub random_seed: u64,
    /// Scatter vertices at random instead of running the insertion phase.
    pub random_start: bool,
    pub insertion: PhaseConfig,
    pub arrangement: PhaseConfig,
    pub optimization: PhaseConfig,
}

impl Default for GemConfig {
    fn default() -> Self {
        Self {
            edge_length: 128.0,
            random_seed: 0,
            random_start: false,
            insertion: PhaseConfig::INSERTION,
            arrangement: PhaseConfig::ARRANGEMENT,
            optimization: PhaseConfig::OPTIMIZATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    UnknownKey { key: String },

    #[error("`{key}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("`{key}` expects an integer, got {value}")]
    NotAnInteger { key: String, value: f64 },

    #[error("`{key}` expects a number")]
    NotANumber { key: String },

    #[error("configuration overrides must be a JSON object")]
    NotAnObject,
}

const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.01..=10.0;
/// Insertion only needs to cool a single vertex, so its target stays low.
const INSERTION_FINAL_RANGE: RangeInclusive<f64> = 0.01..=0.5;
const ITERATION_RANGE: RangeInclusive<f64> = 1.0..=100.0;
const GRAVITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;
const DAMPING_RANGE: RangeInclusive<f64> = 0.0..=2.0;
const SHAKE_RANGE: RangeInclusive<f64> = 0.0..=5.0;
const EDGE_LENGTH_RANGE: RangeInclusive<f64> = 1.0..=1_000_000.0;
const SEED_RANGE: RangeInclusive<f64> = 0.0..=9_007_199_254_740_992.0;
const FLAG_RANGE: RangeInclusive<f64> = 0.0..=1.0;

enum Slot<'a> {
    Float(&'a mut f64),
    Count(&'a mut u32),
    Seed(&'a mut u64),
    Flag(&'a mut bool),
}

impl GemConfig {
    /// Defaults overridden by a JSON object. Rejected entries are returned next to the config.
    pub fn from_json_str(json: &str) -> Result<(Self, Vec<ConfigError>), serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut config = Self::default();
        let rejected = config.apply_json(&value);
        Ok((config, rejected))
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseConfig> {
        match phase {
            Phase::Idle => None,
            Phase::Inserting => Some(&self.insertion),
            Phase::Arranging => Some(&self.arrangement),
            Phase::Optimizing => Some(&self.optimization),
        }
    }

    /// Sets one parameter by its dotted key.
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), ConfigError> {
        let (slot, range) = self
            .slot(key)
            .ok_or_else(|| ConfigError::UnknownKey { key: key.to_string() })?;
        if !range.contains(&value) {
            return Err(ConfigError::OutOfRange {
                key: key.to_string(),
                value,
                min: *range.start(),
                max: *range.end(),
            });
        }
        match slot {
            Slot::Float(f) => *f = value,
            Slot::Count(_) | Slot::Seed(_) | Slot::Flag(_) if value.fract() != 0.0 => {
                return Err(ConfigError::NotAnInteger {
                    key: key.to_string(),
                    value,
                });
            }
            Slot::Count(n) => *n = value as u32,
            Slot::Seed(s) => *s = value as u64,
            Slot::Flag(b) => *b = value != 0.0,
        }
        Ok(())
    }

    /// Applies every entry of a (possibly nested) JSON object. Nested objects are flattened
    /// into dotted keys. Entries that fail are logged, skipped and returned.
    pub fn apply_json(&mut self, overrides: &Value) -> Vec<ConfigError> {
        let mut rejected: Vec<ConfigError> = Vec::new();
        let Value::Object(map) = overrides else {
            tracing::warn!("ignoring configuration overrides: not a JSON object");
            rejected.push(ConfigError::NotAnObject);
            return rejected;
        };
        let mut entries: Vec<(String, &Value)> = Vec::new();
        flatten("", map, &mut entries);
        for (key, value) in entries {
            let number = value.as_f64().or_else(|| value.as_bool().map(f64::from));
            let result = match number {
                Some(v) => self.set(&key, v),
                None => Err(ConfigError::NotANumber { key: key.clone() }),
            };
            if let Err(err) = result {
                tracing::warn!(%err, "configuration value ignored");
                rejected.push(err);
            }
        }
        rejected
    }

    fn slot(&mut self, key: &str) -> Option<(Slot<'_>, RangeInclusive<f64>)> {
        match key {
            "edge_length" => return Some((Slot::Float(&mut self.edge_length), EDGE_LENGTH_RANGE)),
            "seed" | "random_seed" => return Some((Slot::Seed(&mut self.random_seed), SEED_RANGE)),
            "random_start" => return Some((Slot::Flag(&mut self.random_start), FLAG_RANGE)),
            _ => {}
        }
        let (phase, name) = key.split_once('.')?;
        let (phase, final_range) = match phase {
            "insertion" => (&mut self.insertion, INSERTION_FINAL_RANGE),
            "arrangement" => (&mut self.arrangement, TEMPERATURE_RANGE),
            "optimization" => (&mut self.optimization, TEMPERATURE_RANGE),
            _ => return None,
        };
        let slot = match name {
            "start_temperature" => (Slot::Float(&mut phase.start_temperature), TEMPERATURE_RANGE),
            "final_temperature" => (Slot::Float(&mut phase.final_temperature), final_range),
            "max_temperature" => (Slot::Float(&mut phase.max_temperature), TEMPERATURE_RANGE),
            "max_iterations" => (Slot::Count(&mut phase.max_iterations), ITERATION_RANGE),
            "gravity" => (Slot::Float(&mut phase.gravity), GRAVITY_RANGE),
            "oscillation" => (Slot::Float(&mut phase.oscillation), DAMPING_RANGE),
            "rotation" => (Slot::Float(&mut phase.rotation), DAMPING_RANGE),
            "shake" => (Slot::Float(&mut phase.shake), SHAKE_RANGE),
            _ => return None,
        };
        Some(slot)
    }
}

fn flatten<'a>(
    prefix: &str,
    map: &'a serde_json::Map<String, Value>,
    out: &mut Vec<(String, &'a Value)>,
) {
    for (k, v) in map {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        match v {
            Value::Object(inner) => flatten(&key, inner, out),
            _ => out.push((key, v)),
        }
    }
}
