use std::convert::Infallible;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use axiom_types::{AxiomSignals, BenchmarkMode, ModelId};
use serde::Serialize;

use crate::aggregate::BenchmarkSummary;
use crate::error::{AdapterError, ExtractionError};
use crate::runner::BenchmarkResult;
use crate::scenario::BenchmarkScenario;

pub type GenerateFut<'a> = Pin<Box<dyn Future<Output = Result<String, AdapterError>> + Send + 'a>>;

/// Produces a model response for a rendered prompt.
///
/// Implementations must be safe to call concurrently when the runner is
/// configured with `concurrency > 1`.
pub trait ModelAdapter: Send + Sync {
    /// Label recorded with every result, e.g. the model name.
    fn model_id(&self) -> &ModelId;

    fn generate<'a>(&'a self, prompt: &'a str, mode: &'a BenchmarkMode) -> GenerateFut<'a>;
}

/// Maps a prompt/response pair back to engine inputs.
pub trait SignalExtractor: Send + Sync {
    fn extract(&self, prompt: &str, response: &str) -> Result<AxiomSignals, ExtractionError>;
}

/// Supplies the ordered scenario list for a run.
pub trait ScenarioSource {
    type Error;

    fn load(&self) -> Result<Vec<BenchmarkScenario>, Self::Error>;
}

impl ScenarioSource for Vec<BenchmarkScenario> {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<BenchmarkScenario>, Self::Error> {
        Ok(self.clone())
    }
}

impl ScenarioSource for [BenchmarkScenario] {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<BenchmarkScenario>, Self::Error> {
        Ok(self.to_vec())
    }
}

/// Durable sink for a finished run.
pub trait ResultWriter {
    fn write(
        &mut self,
        results: &[BenchmarkResult],
        summary: &BenchmarkSummary,
    ) -> std::io::Result<()>;
}

/// Writes `{"results": [...], "summary": {...}}` as pretty JSON.
#[derive(Debug)]
pub struct JsonResultWriter<W> {
    out: W,
}

impl<W: Write> JsonResultWriter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Serialize)]
struct Report<'a> {
    results: &'a [BenchmarkResult],
    summary: &'a BenchmarkSummary,
}

impl<W: Write> ResultWriter for JsonResultWriter<W> {
    fn write(
        &mut self,
        results: &[BenchmarkResult],
        summary: &BenchmarkSummary,
    ) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &Report { results, summary })?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}
