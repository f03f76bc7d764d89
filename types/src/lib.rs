//! Shared vocabulary of the Universal Axiom workspace: identifiers, benchmark
//! modes and the signal bundle that feeds the engine.
//!
//! No IO and no async. Everything here is plain data with serde support.

mod ids;
mod mode;
mod signals;

use std::fmt;
use std::str::FromStr;

pub use ids::{ModelId, ScenarioId};
pub use mode::{BenchmarkMode, ModeParseError};
pub use signals::{AxiomSignals, DEFAULT_STEP, DEFAULT_TIME};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text that is non-empty once surrounding whitespace is removed. Stored
/// trimmed, so `" s1 "` and `"s1"` are the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("value must not be blank")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        match value.trim() {
            "" => Err(EmptyStringError),
            trimmed if trimmed.len() == value.len() => Ok(Self(value)),
            trimmed => Ok(Self(trimmed.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NonEmptyString {
    type Err = EmptyStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
