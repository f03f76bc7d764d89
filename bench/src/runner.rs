use axiom_core::AxiomEngine;
use axiom_types::{AxiomSignals, BenchmarkMode, ModelId, ScenarioId};
use futures_util::{StreamExt, TryStreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::error::BenchmarkError;
use crate::ports::{ModelAdapter, SignalExtractor};
use crate::scenario::BenchmarkScenario;

/// One (scenario, mode, repetition) execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub scenario_id: ScenarioId,
    pub mode: BenchmarkMode,
    /// Zero-based.
    pub repetition: u32,
    pub model_id: ModelId,
    pub prompt: String,
    pub response: String,
    pub signals: AxiomSignals,
    pub intelligence: f64,
    pub coherence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRunConfig {
    modes: Vec<BenchmarkMode>,
    repetitions: u32,
    concurrency: usize,
}

impl BenchmarkRunConfig {
    /// An empty mode list is accepted and yields no results.
    pub fn new(modes: Vec<BenchmarkMode>, repetitions: u32) -> Result<Self, BenchmarkError> {
        if repetitions == 0 {
            return Err(BenchmarkError::InvalidConfig(
                "repetitions must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            modes,
            repetitions,
            concurrency: 1,
        })
    }

    /// Number of executions kept in flight. Output order is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, BenchmarkError> {
        if concurrency == 0 {
            return Err(BenchmarkError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    #[must_use]
    pub fn modes(&self) -> &[BenchmarkMode] {
        &self.modes
    }

    #[must_use]
    pub const fn repetitions(&self) -> u32 {
        self.repetitions
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Default for BenchmarkRunConfig {
    fn default() -> Self {
        Self {
            modes: BenchmarkMode::canonical(),
            repetitions: 1,
            concurrency: 1,
        }
    }
}

struct Job<'a> {
    scenario: &'a BenchmarkScenario,
    mode: &'a BenchmarkMode,
    repetition: u32,
}

pub struct BenchmarkRunner<A, E> {
    adapter: A,
    extractor: E,
    modes: Vec<BenchmarkMode>,
}

impl<A: ModelAdapter, E: SignalExtractor> BenchmarkRunner<A, E> {
    /// Runner over both canonical modes.
    pub fn new(adapter: A, extractor: E) -> Self {
        Self {
            adapter,
            extractor,
            modes: BenchmarkMode::canonical(),
        }
    }

    /// Replace the modes used by [`Self::run`].
    pub fn with_modes(mut self, modes: Vec<BenchmarkMode>) -> Self {
        self.modes = modes;
        self
    }

    pub fn modes(&self) -> &[BenchmarkMode] {
        &self.modes
    }

    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Run every scenario once in each of the runner's modes.
    pub async fn run(
        &self,
        scenarios: &[BenchmarkScenario],
    ) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        let config = BenchmarkRunConfig::new(self.modes.clone(), 1)?;
        self.run_with_config(scenarios, &config).await
    }

    /// Execute scenarios × modes × repetitions in that nesting order.
    ///
    /// Results come back in enumeration order regardless of concurrency. The
    /// first adapter or extractor failure aborts the run.
    pub async fn run_with_config(
        &self,
        scenarios: &[BenchmarkScenario],
        config: &BenchmarkRunConfig,
    ) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        let jobs: Vec<Job<'_>> = scenarios
            .iter()
            .flat_map(|scenario| {
                config.modes.iter().flat_map(move |mode| {
                    (0..config.repetitions).map(move |repetition| Job {
                        scenario,
                        mode,
                        repetition,
                    })
                })
            })
            .collect();

        let total = jobs.len();
        let results: Vec<BenchmarkResult> = if config.concurrency <= 1 {
            let mut results = Vec::with_capacity(total);
            for job in jobs {
                results.push(self.execute(job).await?);
            }
            results
        } else {
            stream::iter(jobs)
                .map(|job| self.execute(job))
                .buffered(config.concurrency)
                .try_collect()
                .await?
        };

        tracing::info!(
            model = %self.adapter.model_id(),
            results = results.len(),
            "benchmark run complete"
        );
        Ok(results)
    }

    async fn execute(&self, job: Job<'_>) -> Result<BenchmarkResult, BenchmarkError> {
        let Job {
            scenario,
            mode,
            repetition,
        } = job;
        tracing::debug!(scenario = %scenario.id, %mode, repetition, "executing benchmark");

        let prompt = scenario.render_prompt(mode);
        let response = self
            .adapter
            .generate(&prompt, mode)
            .await
            .map_err(|source| BenchmarkError::Adapter {
                scenario: scenario.id.clone(),
                mode: mode.clone(),
                repetition,
                source,
            })?;

        let signals = self.extractor.extract(&prompt, &response).map_err(|source| {
            BenchmarkError::Extraction {
                scenario: scenario.id.clone(),
                mode: mode.clone(),
                repetition,
                source,
            }
        })?;

        let engine = AxiomEngine::from_signals(&signals);
        Ok(BenchmarkResult {
            scenario_id: scenario.id.clone(),
            mode: mode.clone(),
            repetition,
            model_id: self.adapter.model_id().clone(),
            prompt,
            response,
            signals,
            intelligence: engine.compute_intelligence(),
            coherence: engine.coherence(),
        })
    }
}
