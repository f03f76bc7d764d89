use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::{AxiomEngine, AxiomSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationGoal {
    #[default]
    MaximizeIntelligence,
    MaximizeCoherence,
    /// Both the intelligence and the coherence rules.
    Balance,
    ReduceSubjectivity,
}

impl OptimizationGoal {
    const fn targets_intelligence(self) -> bool {
        matches!(self, Self::MaximizeIntelligence | Self::Balance)
    }

    const fn targets_coherence(self) -> bool {
        matches!(self, Self::MaximizeCoherence | Self::Balance)
    }
}

/// Limits the caller places on suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimizationConstraints {
    /// When set, pressure above 4 is left alone instead of pulled down to 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pressure: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Impulses,
    Elements,
    Pressure,
    Subjectivity,
    Purpose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Suggestion {
    pub variable: Variable,
    pub current: f64,
    pub suggested: f64,
    pub impact: Impact,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} -> {} ({:?} impact)",
            self.variable, self.current, self.suggested, self.impact
        )
    }
}

/// Where the configuration lands once every suggestion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub snapshot: AxiomSnapshot,
    pub coherence: f64,
    pub intelligence_change: f64,
    /// Relative to `|current intelligence|`; absent when that is zero.
    pub intelligence_change_percent: Option<f64>,
    pub coherence_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optimization {
    pub goal: OptimizationGoal,
    pub snapshot: AxiomSnapshot,
    pub coherence: f64,
    pub suggestions: Vec<Suggestion>,
    /// `None` when the configuration already suits the goal.
    pub projection: Option<Projection>,
}

impl Optimization {
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Rule-based adjustments toward `goal`, with the projected outcome.
#[must_use]
pub fn optimize(
    engine: &AxiomEngine,
    goal: OptimizationGoal,
    constraints: OptimizationConstraints,
) -> Optimization {
    let snapshot = engine.snapshot();
    let coherence = snapshot.coherence();
    let suggestions = suggest(&snapshot, goal, constraints);

    let projection = (!suggestions.is_empty()).then(|| {
        let projected = apply(&snapshot, &suggestions).snapshot();
        let projected_coherence = projected.coherence();
        let change = projected.intelligence - snapshot.intelligence;
        Projection {
            snapshot: projected,
            coherence: projected_coherence,
            intelligence_change: change,
            intelligence_change_percent: (snapshot.intelligence != 0.0)
                .then(|| change / snapshot.intelligence.abs() * 100.0),
            coherence_change: projected_coherence - coherence,
        }
    });

    Optimization {
        goal,
        snapshot,
        coherence,
        suggestions,
        projection,
    }
}

fn suggest(
    s: &AxiomSnapshot,
    goal: OptimizationGoal,
    constraints: OptimizationConstraints,
) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let mut push = |variable, current, suggested, impact| {
        out.push(Suggestion {
            variable,
            current,
            suggested,
            impact,
        });
    };

    let subjectivity = s.cognitive.subjectivity;
    let pressure = s.foundation.pressure;

    if goal.targets_intelligence() {
        if subjectivity > 0.3 {
            push(
                Variable::Subjectivity,
                subjectivity,
                (subjectivity - 0.3).max(0.0),
                Impact::High,
            );
        }
        if s.cognitive.purpose < 0.8 {
            push(Variable::Purpose, s.cognitive.purpose, 1.0, Impact::Medium);
        }
        if s.foundation.product <= 0.0 {
            for (variable, value) in [
                (Variable::Elements, s.foundation.elements),
                (Variable::Impulses, s.foundation.impulses),
            ] {
                if value < 0.0 {
                    push(variable, value, value.abs(), Impact::Critical);
                }
            }
        }
        if pressure > 4.0 && constraints.max_pressure.is_none() {
            push(Variable::Pressure, pressure, 2.0, Impact::Medium);
        } else if pressure < 0.5 {
            push(Variable::Pressure, pressure, 1.0, Impact::Low);
        }
    }

    if goal.targets_coherence() {
        if subjectivity > 0.2 {
            push(Variable::Subjectivity, subjectivity, 0.1, Impact::High);
        }
        if (pressure - 1.0).abs() > 1.0 {
            push(Variable::Pressure, pressure, 1.0, Impact::Medium);
        }
    }

    if goal == OptimizationGoal::ReduceSubjectivity {
        push(Variable::Subjectivity, subjectivity, 0.0, Impact::High);
    }

    out
}

/// Later suggestions for the same variable override earlier ones.
fn apply(s: &AxiomSnapshot, suggestions: &[Suggestion]) -> AxiomEngine {
    let mut impulses = s.foundation.impulses;
    let mut elements = s.foundation.elements;
    let mut pressure = s.foundation.pressure;
    let mut subjectivity = s.cognitive.subjectivity;
    let mut purpose = s.cognitive.purpose;

    for suggestion in suggestions {
        let slot = match suggestion.variable {
            Variable::Impulses => &mut impulses,
            Variable::Elements => &mut elements,
            Variable::Pressure => &mut pressure,
            Variable::Subjectivity => &mut subjectivity,
            Variable::Purpose => &mut purpose,
        };
        *slot = suggestion.suggested;
    }

    AxiomEngine::new(
        impulses,
        elements,
        pressure,
        subjectivity,
        purpose,
        s.cognitive.time,
        i64::from(s.step),
    )
}
