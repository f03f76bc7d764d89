use serde::{Deserialize, Serialize};

use crate::engine::{AxiomEngine, AxiomSnapshot};

/// Per-step adjustments applied before each advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalChanges {
    pub pressure_per_step: Option<f64>,
    pub subjectivity_per_step: Option<f64>,
    pub purpose_multiplier_per_step: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntelligenceTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceTrend {
    Improving,
    Degrading,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub intelligence_start: f64,
    pub intelligence_end: f64,
    pub intelligence_change: f64,
    pub intelligence_min: f64,
    pub intelligence_max: f64,
    pub intelligence_trend: IntelligenceTrend,
    pub coherence_start: f64,
    pub coherence_end: f64,
    pub coherence_change: f64,
    pub coherence_trend: CoherenceTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    /// Initial state followed by one snapshot per step.
    pub snapshots: Vec<AxiomSnapshot>,
    pub summary: TrajectorySummary,
}

/// Evolve a clone of `engine` for `steps` unit steps, applying `changes`
/// before each advance (pressure, then subjectivity, then purpose).
#[must_use]
pub fn predict_trajectory(
    engine: &AxiomEngine,
    steps: usize,
    changes: EnvironmentalChanges,
) -> Trajectory {
    let mut engine = engine.clone();
    let mut snapshots = Vec::with_capacity(steps + 1);
    snapshots.push(engine.snapshot());

    for _ in 0..steps {
        if let Some(delta) = changes.pressure_per_step {
            engine.apply_pressure_delta(delta);
        }
        if let Some(delta) = changes.subjectivity_per_step {
            engine.adjust_subjectivity(delta);
        }
        if let Some(multiplier) = changes.purpose_multiplier_per_step {
            engine.scale_purpose(multiplier);
        }
        engine.advance(1.0);
        snapshots.push(engine.snapshot());
    }

    let summary = summarize(&snapshots);
    Trajectory { snapshots, summary }
}

fn summarize(snapshots: &[AxiomSnapshot]) -> TrajectorySummary {
    // Never empty: the initial state is always recorded.
    let first = &snapshots[0];
    let last = &snapshots[snapshots.len() - 1];

    let (intelligence_min, intelligence_max) = snapshots.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), s| (lo.min(s.intelligence), hi.max(s.intelligence)),
    );

    let (i0, i1) = (first.intelligence, last.intelligence);
    let (c0, c1) = (first.coherence(), last.coherence());

    TrajectorySummary {
        intelligence_start: i0,
        intelligence_end: i1,
        intelligence_change: i1 - i0,
        intelligence_min,
        intelligence_max,
        intelligence_trend: if i1 > i0 {
            IntelligenceTrend::Increasing
        } else if i1 < i0 {
            IntelligenceTrend::Decreasing
        } else {
            IntelligenceTrend::Stable
        },
        coherence_start: c0,
        coherence_end: c1,
        coherence_change: c1 - c0,
        coherence_trend: if c1 > c0 {
            CoherenceTrend::Improving
        } else if c1 < c0 {
            CoherenceTrend::Degrading
        } else {
            CoherenceTrend::Stable
        },
    }
}
