use serde::{Deserialize, Serialize};

/// The five synthetic trajectory generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionType {
    Linear,
    Curved,
    RandomWalk,
    Circular,
    Realistic,
}

/// Configuration for one simulation run with tunable shape parameters.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    pub motion_type: MotionType,

    /// Nominal number of interpolation steps; each model derives its own
    /// total sample count from this (see the per-model termination rules).
    pub step_count: u32,

    /// Base delay between samples.
    pub update_interval_ms: u64,

    /// How far from the target the trajectory starts.
    pub start_distance_km: f64,

    /// Per-axis uniform noise amplitude, in degrees.
    pub noise_level: f64,

    /// When set, a step may pause (doubled delay) with `stop_probability`.
    pub has_stops: bool,
    pub stop_probability: f64,

    /// Fixed RNG seed for repeatable runs; None draws from entropy.
    pub seed: Option<u64>,
}

impl MotionConfig {
    pub fn new(motion_type: MotionType) -> Self {
        Self {
            motion_type,
            ..Self::default()
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            motion_type: MotionType::Linear,
            step_count: 20,
            update_interval_ms: 1000,
            start_distance_km: 0.5,
            noise_level: 0.0001,
            has_stops: false,
            stop_probability: 0.15,
            seed: None,
        }
    }
}
