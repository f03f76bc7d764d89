use axiom_types::AxiomSignals;
use serde::{Deserialize, Serialize};

use crate::layers::{CognitiveState, FoundationState, GrowthState};

/// The full intelligence model.
///
/// Owns the foundation, growth and cognitive layers outright. The step index
/// lives only in the growth layer, and the only way to change any layer is
/// through the mutators below, each of which returns the recomputed
/// intelligence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomEngine {
    foundation: FoundationState,
    growth: GrowthState,
    cognitive: CognitiveState,
}

impl AxiomEngine {
    #[must_use]
    pub fn new(
        impulses: f64,
        elements: f64,
        pressure: f64,
        subjectivity: f64,
        purpose: f64,
        time: f64,
        n: i64,
    ) -> Self {
        Self::from_layers(
            FoundationState::new(impulses, elements, pressure),
            GrowthState::new(n),
            CognitiveState::new(subjectivity, purpose, time),
        )
    }

    #[must_use]
    pub const fn from_layers(
        foundation: FoundationState,
        growth: GrowthState,
        cognitive: CognitiveState,
    ) -> Self {
        Self {
            foundation,
            growth,
            cognitive,
        }
    }

    #[must_use]
    pub fn from_signals(signals: &AxiomSignals) -> Self {
        Self::new(
            signals.impulses,
            signals.elements,
            signals.pressure,
            signals.subjectivity,
            signals.purpose,
            signals.time,
            signals.n,
        )
    }

    #[must_use]
    pub const fn foundation(&self) -> &FoundationState {
        &self.foundation
    }

    #[must_use]
    pub const fn growth(&self) -> &GrowthState {
        &self.growth
    }

    #[must_use]
    pub const fn cognitive(&self) -> &CognitiveState {
        &self.cognitive
    }

    #[must_use]
    pub const fn step(&self) -> u32 {
        self.growth.step()
    }

    /// `E_n · (1 + F_n) · X · Y · Z · (A · B · C)`.
    ///
    /// Negative when the foundation product is negative, exactly zero when
    /// subjectivity is exactly one.
    #[must_use]
    pub fn compute_intelligence(&self) -> f64 {
        self.growth.compute() * self.cognitive.product() * self.foundation.product()
    }

    /// Move one step forward (saturating at the step ceiling) and advance time
    /// by `delta_time`, which may be any value.
    pub fn advance(&mut self, delta_time: f64) -> f64 {
        self.growth.set_step(i64::from(self.growth.step()) + 1);
        self.cognitive.advance_time(delta_time);
        self.compute_intelligence()
    }

    /// Add `delta` to pressure, flooring the result at [`crate::PRESSURE_FLOOR`].
    pub fn apply_pressure_delta(&mut self, delta: f64) -> f64 {
        self.foundation.apply_pressure_delta(delta);
        self.compute_intelligence()
    }

    /// Add `delta` to subjectivity, clamping the result to `[0, 1]`.
    pub fn adjust_subjectivity(&mut self, delta: f64) -> f64 {
        self.cognitive.adjust_subjectivity(delta);
        self.compute_intelligence()
    }

    /// Multiply purpose by `multiplier`, flooring the result at [`crate::PURPOSE_FLOOR`].
    pub fn scale_purpose(&mut self, multiplier: f64) -> f64 {
        self.cognitive.scale_purpose(multiplier);
        self.compute_intelligence()
    }

    #[must_use]
    pub fn snapshot(&self) -> AxiomSnapshot {
        AxiomSnapshot {
            step: self.step(),
            foundation: FoundationSnapshot {
                impulses: self.foundation.impulses(),
                elements: self.foundation.elements(),
                pressure: self.foundation.pressure(),
                product: self.foundation.product(),
            },
            growth: GrowthSnapshot {
                exponential: self.growth.exponential_growth(),
                regulation: self.growth.fibonacci_regulation(),
                product: self.growth.compute(),
            },
            cognitive: CognitiveSnapshot {
                subjectivity: self.cognitive.subjectivity(),
                objectivity: self.cognitive.objectivity(),
                purpose: self.cognitive.purpose(),
                time: self.cognitive.time(),
                product: self.cognitive.product(),
            },
            intelligence: self.compute_intelligence(),
        }
    }

    /// Coherence of the current state. See [`AxiomSnapshot::coherence`].
    #[must_use]
    pub fn coherence(&self) -> f64 {
        self.snapshot().coherence()
    }
}

impl Default for AxiomEngine {
    fn default() -> Self {
        Self::from_signals(&AxiomSignals::default())
    }
}

impl From<AxiomSignals> for AxiomEngine {
    fn from(signals: AxiomSignals) -> Self {
        Self::from_signals(&signals)
    }
}

/// Every raw and derived value of an engine at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxiomSnapshot {
    pub step: u32,
    pub foundation: FoundationSnapshot,
    pub growth: GrowthSnapshot,
    pub cognitive: CognitiveSnapshot,
    pub intelligence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundationSnapshot {
    pub impulses: f64,
    pub elements: f64,
    pub pressure: f64,
    pub product: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSnapshot {
    /// `E_n`
    pub exponential: f64,
    /// `F_n`
    pub regulation: f64,
    pub product: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveSnapshot {
    pub subjectivity: f64,
    pub objectivity: f64,
    pub purpose: f64,
    pub time: f64,
    pub product: f64,
}

impl AxiomSnapshot {
    /// Bounded balance heuristic, independent of the intelligence formula.
    ///
    /// Mean of objectivity, `min(purpose / 2, 1)` and `1 / (1 + |pressure − 1|)`.
    /// The pressure term peaks at pressure 1 and decays symmetrically.
    #[must_use]
    pub fn coherence(&self) -> f64 {
        let objectivity = self.cognitive.objectivity;
        let purpose = (self.cognitive.purpose / 2.0).min(1.0);
        let pressure = 1.0 / (1.0 + (self.foundation.pressure - 1.0).abs());
        (objectivity + purpose + pressure) / 3.0
    }
}
