//! Step-wise replay of an [`AxiomEngine`] with per-step snapshots.

use crate::engine::{AxiomEngine, AxiomSnapshot};

/// Subjectivity removed on each resolution step of the pressure protocol.
pub const SUBJECTIVITY_RELIEF: f64 = 0.1;

/// Drives an engine through one of the simulation protocols and keeps the
/// recorded history. The first snapshot of every run is the pre-run state.
#[derive(Debug, Clone)]
pub struct AxiomScenarioRunner {
    engine: AxiomEngine,
    history: Vec<AxiomSnapshot>,
}

impl AxiomScenarioRunner {
    #[must_use]
    pub fn new(engine: AxiomEngine) -> Self {
        Self {
            engine,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &AxiomEngine {
        &self.engine
    }

    #[must_use]
    pub fn into_engine(self) -> AxiomEngine {
        self.engine
    }

    /// History of the most recent run.
    #[must_use]
    pub fn history(&self) -> &[AxiomSnapshot] {
        &self.history
    }

    #[must_use]
    pub fn coherence(&self) -> f64 {
        self.engine.coherence()
    }

    fn record(&mut self) {
        let snapshot = self.engine.snapshot();
        tracing::debug!(
            step = snapshot.step,
            intelligence = snapshot.intelligence,
            pressure = snapshot.foundation.pressure,
            "recorded axiom state"
        );
        self.history.push(snapshot);
    }

    /// Advance `steps` times by `delta_time`. Yields `steps + 1` snapshots.
    pub fn simulate_evolution(&mut self, steps: usize, delta_time: f64) -> &[AxiomSnapshot] {
        self.history.clear();
        self.record();

        for _ in 0..steps {
            self.engine.advance(delta_time);
            self.record();
        }

        &self.history
    }

    /// Spike pressure by `initial_pressure`, then resolve it over
    /// `resolution_steps` iterations of: subjectivity −0.1, pressure release of
    /// `initial_pressure / resolution_steps`, one default advance.
    ///
    /// The releases sum to the spike, so pressure returns to its start unless
    /// the floor intervened. Yields `resolution_steps + 2` snapshots.
    pub fn simulate_pressure_resolution(
        &mut self,
        initial_pressure: f64,
        resolution_steps: usize,
    ) -> &[AxiomSnapshot] {
        self.history.clear();
        self.record();

        self.engine.apply_pressure_delta(initial_pressure);
        self.record();

        for _ in 0..resolution_steps {
            let release = -initial_pressure / resolution_steps as f64;
            self.engine.adjust_subjectivity(-SUBJECTIVITY_RELIEF);
            self.engine.apply_pressure_delta(release);
            self.engine.advance(1.0);
            self.record();
        }

        &self.history
    }
}
