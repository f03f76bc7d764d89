use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EmptyStringError, NonEmptyString};

/// Identifier of the model behind an adapter (e.g. `gpt-4o-mini`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(NonEmptyString);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyStringError> {
        NonEmptyString::new(id).map(Self)
    }

    /// For built-in identifiers such as defaults. A blank literal is a
    /// programming error and panics.
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        let id = id.trim();
        assert!(!id.is_empty(), "built-in model id must not be blank");
        Self(NonEmptyString(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a benchmark scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(NonEmptyString);

impl ScenarioId {
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyStringError> {
        NonEmptyString::new(id).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
