//! Benchmark modes.
//!
//! A mode controls how a scenario prompt is rendered and is the grouping key
//! for aggregation. Two modes are canonical; anything else is carried as a
//! named custom mode that is rendered and summarized like `baseline` but never
//! takes part in the baseline/guided delta.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BenchmarkMode {
    /// The bare scenario prompt.
    Baseline,
    /// The scenario prompt followed by its axiom context, when it has one.
    AxiomGuided,
    Custom(String),
}

#[derive(Debug, Error)]
#[error("benchmark mode label must not be empty")]
pub struct ModeParseError;

impl BenchmarkMode {
    pub const BASELINE_LABEL: &'static str = "baseline";
    pub const AXIOM_GUIDED_LABEL: &'static str = "axiom_guided";

    /// Parse a mode label. Canonical labels are matched case-insensitively.
    pub fn parse(label: &str) -> Result<Self, ModeParseError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ModeParseError);
        }
        if trimmed.eq_ignore_ascii_case(Self::BASELINE_LABEL) {
            Ok(Self::Baseline)
        } else if trimmed.eq_ignore_ascii_case(Self::AXIOM_GUIDED_LABEL)
            || trimmed.eq_ignore_ascii_case("guided")
        {
            Ok(Self::AxiomGuided)
        } else {
            Ok(Self::Custom(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Baseline => Self::BASELINE_LABEL,
            Self::AxiomGuided => Self::AXIOM_GUIDED_LABEL,
            Self::Custom(label) => label,
        }
    }

    /// Whether this mode appends scenario context to the prompt.
    #[must_use]
    pub const fn appends_context(&self) -> bool {
        matches!(self, Self::AxiomGuided)
    }

    /// The two canonical modes, in their conventional order.
    #[must_use]
    pub fn canonical() -> Vec<Self> {
        vec![Self::Baseline, Self::AxiomGuided]
    }
}

impl TryFrom<String> for BenchmarkMode {
    type Error = ModeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BenchmarkMode> for String {
    fn from(value: BenchmarkMode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
