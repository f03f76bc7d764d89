//! Read-only analysis over engine states: coherence bands, per-layer
//! diagnostics, pairwise comparison, trajectory prediction, collapse risk and
//! rule-based optimization.
//!
//! Nothing here mutates the engine it is given. Functions that need to evolve
//! a state work on a clone.

mod compare;
mod optimize;
mod risk;
mod trajectory;

pub use compare::{ComparisonCriterion, CriterionOutcome, PermutationComparison, Winner, compare};
pub use optimize::{
    Impact, Optimization, OptimizationConstraints, OptimizationGoal, Projection, Suggestion,
    Variable, optimize,
};
pub use risk::{CollapseRisk, RecentTrend, RiskFactor, RiskLevel, Severity, assess_collapse_risk};
pub use trajectory::{
    CoherenceTrend, EnvironmentalChanges, IntelligenceTrend, Trajectory, TrajectorySummary,
    predict_trajectory,
};

use std::fmt;

use serde::Serialize;

use crate::engine::{AxiomEngine, AxiomSnapshot};

const HIGH_PRESSURE: f64 = 3.0;
const HIGH_SUBJECTIVITY: f64 = 0.7;
const LOW_PURPOSE: f64 = 0.3;
const EARLY_ITERATION: u32 = 3;

/// Coarse band of a coherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceLevel {
    High,
    Moderate,
    Low,
}

impl CoherenceLevel {
    /// `> 0.7` high, `> 0.4` moderate, anything else low.
    #[must_use]
    pub fn from_score(coherence: f64) -> Self {
        if coherence > 0.7 {
            Self::High
        } else if coherence > 0.4 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn interpretation(self) -> &'static str {
        match self {
            Self::High => "High coherence - system is well-aligned",
            Self::Moderate => "Moderate coherence - some adjustment needed",
            Self::Low => "Low coherence - significant realignment required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundationStatus {
    /// Product at or below zero.
    Weak,
    HighPressure,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveStatus {
    HighSubjectivity,
    LowPurpose,
    Balanced,
}

/// Actionable advice derived from a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    RepairFoundation,
    ReducePressure,
    IncreaseObjectivity,
    ClarifyPurpose,
    KeepEvolving,
    Realign,
    WellAligned,
    Balanced,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RepairFoundation => {
                "Foundation is negative or zero. Address impulses, elements, or pressure."
            }
            Self::ReducePressure => {
                "High pressure detected. Reduce constraints or resolve contradictions."
            }
            Self::IncreaseObjectivity => {
                "High subjectivity. Gather data, reduce bias, challenge assumptions."
            }
            Self::ClarifyPurpose => "Low purpose alignment. Clarify goals before proceeding.",
            Self::KeepEvolving => "Early iteration. Let the system evolve for growth potential.",
            Self::Realign => "Low coherence. Realign across multiple dimensions.",
            Self::WellAligned => "High coherence. System is well-aligned and stable.",
            Self::Balanced => "System appears balanced. Consider evolution or exploration.",
        })
    }
}

/// Per-layer diagnosis of one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermutationReport {
    pub snapshot: AxiomSnapshot,
    pub foundation: FoundationStatus,
    /// `E_n / (1 + F_n)`
    pub growth_rate: f64,
    pub early_iteration: bool,
    pub cognitive: CognitiveStatus,
    pub coherence: f64,
    pub coherence_level: CoherenceLevel,
    pub recommendations: Vec<Recommendation>,
}

#[must_use]
pub fn diagnose(engine: &AxiomEngine) -> PermutationReport {
    let snapshot = engine.snapshot();
    let coherence = snapshot.coherence();

    let foundation = if snapshot.foundation.product <= 0.0 {
        FoundationStatus::Weak
    } else if snapshot.foundation.pressure > HIGH_PRESSURE {
        FoundationStatus::HighPressure
    } else {
        FoundationStatus::Stable
    };

    let cognitive = if snapshot.cognitive.subjectivity > HIGH_SUBJECTIVITY {
        CognitiveStatus::HighSubjectivity
    } else if snapshot.cognitive.purpose < LOW_PURPOSE {
        CognitiveStatus::LowPurpose
    } else {
        CognitiveStatus::Balanced
    };

    PermutationReport {
        snapshot,
        foundation,
        growth_rate: snapshot.growth.exponential / (1.0 + snapshot.growth.regulation),
        early_iteration: snapshot.step < EARLY_ITERATION,
        cognitive,
        coherence,
        coherence_level: CoherenceLevel::from_score(coherence),
        recommendations: recommendations(&snapshot, coherence),
    }
}

fn recommendations(snapshot: &AxiomSnapshot, coherence: f64) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if snapshot.foundation.product <= 0.0 {
        out.push(Recommendation::RepairFoundation);
    } else if snapshot.foundation.pressure > HIGH_PRESSURE {
        out.push(Recommendation::ReducePressure);
    }
    if snapshot.cognitive.subjectivity > HIGH_SUBJECTIVITY {
        out.push(Recommendation::IncreaseObjectivity);
    }
    if snapshot.cognitive.purpose < LOW_PURPOSE {
        out.push(Recommendation::ClarifyPurpose);
    }
    if snapshot.step < EARLY_ITERATION {
        out.push(Recommendation::KeepEvolving);
    }
    if coherence < 0.4 {
        out.push(Recommendation::Realign);
    } else if coherence > 0.7 {
        out.push(Recommendation::WellAligned);
    }

    if out.is_empty() {
        out.push(Recommendation::Balanced);
    }
    out
}
