use axiom_types::{BenchmarkMode, ScenarioId};
use thiserror::Error;

/// Failure raised by a [`crate::ModelAdapter`].
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Missing or unusable configuration such as an absent credential.
    /// Raised on first use, never at construction.
    #[error("adapter configuration error: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure raised by a [`crate::SignalExtractor`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("malformed signals: {0}")]
    Malformed(String),
    #[error("missing signal field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("adapter failed for scenario {scenario} in mode {mode} (repetition {repetition})")]
    Adapter {
        scenario: ScenarioId,
        mode: BenchmarkMode,
        repetition: u32,
        #[source]
        source: AdapterError,
    },
    #[error("extraction failed for scenario {scenario} in mode {mode} (repetition {repetition})")]
    Extraction {
        scenario: ScenarioId,
        mode: BenchmarkMode,
        repetition: u32,
        #[source]
        source: ExtractionError,
    },
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(String),
}

impl BenchmarkError {
    /// The scenario whose execution failed, if this is an execution failure.
    #[must_use]
    pub fn scenario(&self) -> Option<&ScenarioId> {
        match self {
            Self::Adapter { scenario, .. } | Self::Extraction { scenario, .. } => Some(scenario),
            Self::InvalidConfig(_) => None,
        }
    }
}
