use serde::{Deserialize, Serialize};

/// Step index used when a signal source does not provide one.
pub const DEFAULT_STEP: i64 = 1;
/// Time value used when a signal source does not provide one.
pub const DEFAULT_TIME: f64 = 1.0;

const fn default_step() -> i64 {
    DEFAULT_STEP
}

const fn default_time() -> f64 {
    DEFAULT_TIME
}

/// Engine inputs extracted from a model response: the foundation triple
/// (A, B, C), the cognitive triple (X, Y, Z) and the step index `n`.
///
/// No validation happens here. Out-of-range values are absorbed by the
/// engine's clamping when the signals are turned into an engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxiomSignals {
    pub impulses: f64,
    pub elements: f64,
    pub pressure: f64,
    pub subjectivity: f64,
    pub purpose: f64,
    #[serde(default = "default_time")]
    pub time: f64,
    #[serde(default = "default_step")]
    pub n: i64,
}

impl Default for AxiomSignals {
    fn default() -> Self {
        Self {
            impulses: 1.0,
            elements: 1.0,
            pressure: 1.0,
            subjectivity: 0.0,
            purpose: 1.0,
            time: DEFAULT_TIME,
            n: DEFAULT_STEP,
        }
    }
}
