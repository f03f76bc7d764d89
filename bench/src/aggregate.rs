use axiom_types::BenchmarkMode;
use serde::Serialize;

use crate::runner::BenchmarkResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    pub mean: f64,
    pub median: f64,
}

impl MetricStats {
    /// `None` for an empty sample.
    fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        // Running mean stays finite wherever the true mean is.
        let mean = values
            .iter()
            .zip(1u32..)
            .fold(0.0, |mean, (x, k)| mean + (x - mean) / f64::from(k));
        values.sort_by(f64::total_cmp);
        let mid = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            values[mid - 1] / 2.0 + values[mid] / 2.0
        } else {
            values[mid]
        };
        Some(Self { mean, median })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeStats {
    pub mode: BenchmarkMode,
    pub count: usize,
    pub intelligence: MetricStats,
    pub coherence: MetricStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    /// One entry per distinct mode, in first-seen order.
    pub modes: Vec<ModeStats>,
    /// Guided mean minus baseline mean; present only when both canonical
    /// modes have results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence_delta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coherence_delta: Option<f64>,
}

impl BenchmarkSummary {
    #[must_use]
    pub fn stats_for(&self, mode: &BenchmarkMode) -> Option<&ModeStats> {
        self.modes.iter().find(|stats| &stats.mode == mode)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BenchmarkAggregator;

impl BenchmarkAggregator {
    #[must_use]
    pub fn summarize(results: &[BenchmarkResult]) -> BenchmarkSummary {
        let mut groups: Vec<(&BenchmarkMode, Vec<&BenchmarkResult>)> = Vec::new();
        for result in results {
            match groups.iter_mut().find(|(mode, _)| *mode == &result.mode) {
                Some((_, members)) => members.push(result),
                None => groups.push((&result.mode, vec![result])),
            }
        }

        let modes: Vec<ModeStats> = groups
            .into_iter()
            .filter_map(|(mode, members)| {
                let intelligence =
                    MetricStats::from_values(members.iter().map(|r| r.intelligence).collect())?;
                let coherence =
                    MetricStats::from_values(members.iter().map(|r| r.coherence).collect())?;
                Some(ModeStats {
                    mode: mode.clone(),
                    count: members.len(),
                    intelligence,
                    coherence,
                })
            })
            .collect();

        let find = |wanted: &BenchmarkMode| modes.iter().find(|stats| &stats.mode == wanted);
        let (intelligence_delta, coherence_delta) =
            match (find(&BenchmarkMode::Baseline), find(&BenchmarkMode::AxiomGuided)) {
                (Some(baseline), Some(guided)) => (
                    Some(guided.intelligence.mean - baseline.intelligence.mean),
                    Some(guided.coherence.mean - baseline.coherence.mean),
                ),
                _ => (None, None),
            };

        let summary = BenchmarkSummary {
            modes,
            intelligence_delta,
            coherence_delta,
        };
        tracing::debug!(
            modes = summary.modes.len(),
            results = results.len(),
            "summarized benchmark results"
        );
        summary
    }
}
