//! Benchmark harness for the Universal Axiom.
//!
//! A [`BenchmarkRunner`] renders each [`BenchmarkScenario`] for every configured
//! [`BenchmarkMode`](axiom_types::BenchmarkMode), asks a [`ModelAdapter`] for a
//! response, maps `(prompt, response)` back to engine inputs through a
//! [`SignalExtractor`], and records one [`BenchmarkResult`] per execution.
//! [`BenchmarkAggregator`] turns the flat result list into per-mode statistics.
//!
//! The runner only ever sees the port traits, so deterministic doubles can be
//! swapped in for network-backed adapters.

mod aggregate;
mod error;
mod ports;
mod runner;
mod scenario;

pub use aggregate::{BenchmarkAggregator, BenchmarkSummary, MetricStats, ModeStats};
pub use error::{AdapterError, BenchmarkError, ExtractionError};
pub use ports::{
    GenerateFut, JsonResultWriter, ModelAdapter, ResultWriter, ScenarioSource, SignalExtractor,
};
pub use runner::{BenchmarkResult, BenchmarkRunConfig, BenchmarkRunner};
pub use scenario::BenchmarkScenario;
