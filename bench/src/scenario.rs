use axiom_types::{BenchmarkMode, ScenarioId};
use serde::{Deserialize, Serialize};

/// A prompt under test, with optional context appended in guided mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkScenario {
    pub id: ScenarioId,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axiom_context: Option<String>,
}

impl BenchmarkScenario {
    #[must_use]
    pub fn new(id: ScenarioId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            axiom_context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.axiom_context = Some(context.into());
        self
    }

    /// Plain concatenation, no templating. Only guided mode with a non-empty
    /// context differs from the base prompt: `"{prompt}\n\n{context}"`.
    #[must_use]
    pub fn render_prompt(&self, mode: &BenchmarkMode) -> String {
        match self.axiom_context.as_deref() {
            Some(context) if mode.appends_context() && !context.is_empty() => {
                format!("{}\n\n{}", self.prompt, context)
            }
            _ => self.prompt.clone(),
        }
    }
}
