use std::fmt;

use serde::Serialize;

use crate::engine::{AxiomEngine, AxiomSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            10.. => Self::Critical,
            6..=9 => Self::High,
            3..=5 => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn warning(self) -> &'static str {
        match self {
            Self::Critical => {
                "CRITICAL: system collapse is imminent or has occurred. Immediate intervention required."
            }
            Self::High => "HIGH RISK: system is under severe stress. Take corrective action soon.",
            Self::Medium => "MODERATE RISK: monitor closely and address the identified factors.",
            Self::Low => "System appears stable with low collapse risk.",
        }
    }
}

/// One contributor to a collapse risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    NegativeFoundation,
    WeakFoundation,
    ExtremePressure,
    HighPressure,
    ExtremeSubjectivity,
    HighSubjectivity,
    NoPurpose,
    WeakPurpose,
    CriticalCoherence,
    LowCoherence,
    DecliningTrajectory,
}

impl RiskFactor {
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::NegativeFoundation => 10,
            Self::CriticalCoherence => 8,
            Self::WeakFoundation => 7,
            Self::ExtremePressure | Self::DecliningTrajectory => 6,
            Self::ExtremeSubjectivity | Self::NoPurpose => 5,
            Self::LowCoherence => 4,
            Self::HighPressure | Self::HighSubjectivity => 3,
            Self::WeakPurpose => 2,
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::NegativeFoundation | Self::CriticalCoherence => Severity::Critical,
            Self::WeakFoundation
            | Self::ExtremePressure
            | Self::ExtremeSubjectivity
            | Self::NoPurpose
            | Self::LowCoherence
            | Self::DecliningTrajectory => Severity::High,
            Self::HighPressure | Self::HighSubjectivity | Self::WeakPurpose => Severity::Medium,
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NegativeFoundation => "Foundation is zero or negative; the system has collapsed",
            Self::WeakFoundation => "Foundation is weak and close to collapse",
            Self::ExtremePressure => "Very high pressure can cause instability and collapse",
            Self::HighPressure => "Elevated pressure; monitor for stress indicators",
            Self::ExtremeSubjectivity => "Near-total subjectivity distorts coherence",
            Self::HighSubjectivity => "High subjectivity reduces objectivity and stability",
            Self::NoPurpose => "Lack of purpose leads to directionless drift",
            Self::WeakPurpose => "Low purpose alignment reduces coherence",
            Self::CriticalCoherence => "Critically low coherence indicates imminent failure",
            Self::LowCoherence => "Low coherence suggests the system is under stress",
            Self::DecliningTrajectory => "Intelligence has declined over the last three states",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecentTrend {
    Declining,
    StableOrImproving,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollapseRisk {
    pub snapshot: AxiomSnapshot,
    pub level: RiskLevel,
    pub score: u32,
    pub factors: Vec<RiskFactor>,
    /// `None` unless more than two history points were supplied.
    pub recent_trend: Option<RecentTrend>,
}

/// Score how close `engine` is to collapse. `history` is an optional
/// trajectory (oldest first); only its last three points are inspected.
#[must_use]
pub fn assess_collapse_risk(engine: &AxiomEngine, history: &[AxiomSnapshot]) -> CollapseRisk {
    let snapshot = engine.snapshot();
    let coherence = snapshot.coherence();
    let mut factors = Vec::new();

    let foundation = snapshot.foundation.product;
    if foundation <= 0.0 {
        factors.push(RiskFactor::NegativeFoundation);
    } else if foundation < 0.5 {
        factors.push(RiskFactor::WeakFoundation);
    }

    let pressure = snapshot.foundation.pressure;
    if pressure > 5.0 {
        factors.push(RiskFactor::ExtremePressure);
    } else if pressure > 3.0 {
        factors.push(RiskFactor::HighPressure);
    }

    let subjectivity = snapshot.cognitive.subjectivity;
    if subjectivity > 0.9 {
        factors.push(RiskFactor::ExtremeSubjectivity);
    } else if subjectivity > 0.7 {
        factors.push(RiskFactor::HighSubjectivity);
    }

    let purpose = snapshot.cognitive.purpose;
    if purpose < 0.1 {
        factors.push(RiskFactor::NoPurpose);
    } else if purpose < 0.3 {
        factors.push(RiskFactor::WeakPurpose);
    }

    if coherence < 0.2 {
        factors.push(RiskFactor::CriticalCoherence);
    } else if coherence < 0.4 {
        factors.push(RiskFactor::LowCoherence);
    }

    let recent_trend = (history.len() > 2).then(|| {
        let recent = &history[history.len() - 3..];
        if recent.windows(2).all(|w| w[1].intelligence < w[0].intelligence) {
            factors.push(RiskFactor::DecliningTrajectory);
            RecentTrend::Declining
        } else {
            RecentTrend::StableOrImproving
        }
    });

    let score = factors.iter().map(|f| f.weight()).sum();
    let level = RiskLevel::from_score(score);
    tracing::debug!(score, ?level, factors = factors.len(), "assessed collapse risk");

    CollapseRisk {
        snapshot,
        level,
        score,
        factors,
        recent_trend,
    }
}
