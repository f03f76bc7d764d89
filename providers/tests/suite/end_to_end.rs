//! Config file -> runner -> aggregation -> writer, over a mock model

use axiom_bench::{
    BenchmarkAggregator, BenchmarkRunner, JsonResultWriter, ResultWriter, ScenarioSource,
};
use axiom_config::AxiomConfig;
use axiom_providers::{ChatCompletionsAdapter, JsonSignalExtractor};
use axiom_types::BenchmarkMode;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TEST_KEY, chat_body, signals_reply};

const CONTEXT_MARKER: &str = "Apply the universal axiom";

async fn mock_model() -> MockServer {
    let server = MockServer::start().await;
    // Guided prompts carry the context and get a more purposeful answer.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(CONTEXT_MARKER))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body(&signals_reply(0.0, 2.0))),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body(&signals_reply(0.0, 1.0))),
        )
        .mount(&server)
        .await;
    server
}

fn write_config(
    dir: &tempfile::TempDir,
    server: &MockServer,
    concurrency: usize,
) -> std::path::PathBuf {
    let config = format!(
        r#"
[benchmark]
modes = ["baseline", "axiom_guided"]
repetitions = 2
concurrency = {concurrency}

[provider]
model = "gpt-test"
api_base = "{base}/v1"
api_key = "{TEST_KEY}"
timeout_secs = 5
max_retries = 0

[[scenarios]]
id = "triage"
prompt = "Prioritise these incidents."
axiom_context = "{CONTEXT_MARKER} when weighing the incidents."

[[scenarios]]
id = "arithmetic"
prompt = "What is 17 * 3?"
"#,
        base = server.uri(),
    );
    let path = dir.path().join("config.toml");
    std::fs::write(&path, config).unwrap();
    path
}

#[tokio::test]
async fn configured_run_summarizes_and_writes() -> anyhow::Result<()> {
    let server = mock_model().await;
    let dir = tempfile::tempdir()?;
    let config = AxiomConfig::load_from(&write_config(&dir, &server, 1))?;

    let adapter = ChatCompletionsAdapter::from_config(&config.provider());
    let runner = BenchmarkRunner::new(adapter, JsonSignalExtractor::new());
    let scenarios = ScenarioSource::load(&config)?;
    let results = runner
        .run_with_config(&scenarios, &config.run_config()?)
        .await?;

    // 2 scenarios x 2 modes x 2 repetitions
    assert_eq!(results.len(), 8);
    assert_eq!(results[0].scenario_id.as_str(), "triage");
    assert_eq!(results[2].mode, BenchmarkMode::AxiomGuided);
    assert!(results[2].prompt.ends_with("when weighing the incidents."));
    assert_eq!(results[2].intelligence, 20.0);
    // the second scenario has no context, so guided renders like baseline
    assert_eq!(results[6].prompt, "What is 17 * 3?");
    assert_eq!(results[6].intelligence, 10.0);

    let summary = BenchmarkAggregator::summarize(&results);
    let baseline = summary.stats_for(&BenchmarkMode::Baseline).unwrap();
    let guided = summary.stats_for(&BenchmarkMode::AxiomGuided).unwrap();
    assert_eq!(baseline.count, 4);
    assert_eq!(guided.count, 4);
    assert_eq!(baseline.intelligence.mean, 10.0);
    assert_eq!(guided.intelligence.mean, 15.0);
    assert_eq!(guided.intelligence.median, 15.0);
    assert_eq!(summary.intelligence_delta, Some(5.0));
    assert_eq!(
        summary.coherence_delta,
        Some(guided.coherence.mean - baseline.coherence.mean)
    );

    let mut writer = JsonResultWriter::new(Vec::new());
    writer.write(&results, &summary)?;
    let report: serde_json::Value = serde_json::from_slice(&writer.into_inner())?;
    assert_eq!(report["results"].as_array().map(Vec::len), Some(8));
    assert_eq!(report["results"][0]["model_id"], "gpt-test");
    assert_eq!(report["summary"]["intelligence_delta"], 5.0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_run_matches_sequential_order() -> anyhow::Result<()> {
    let server = mock_model().await;
    let dir = tempfile::tempdir()?;

    let sequential = AxiomConfig::load_from(&write_config(&dir, &server, 1))?;
    let concurrent = AxiomConfig::load_from(&write_config(&dir, &server, 4))?;
    assert_eq!(concurrent.run_config()?.concurrency(), 4);

    let runner = BenchmarkRunner::new(
        ChatCompletionsAdapter::from_config(&sequential.provider()),
        JsonSignalExtractor::new(),
    );
    let a = runner
        .run_with_config(sequential.scenarios(), &sequential.run_config()?)
        .await?;
    let b = runner
        .run_with_config(concurrent.scenarios(), &concurrent.run_config()?)
        .await?;
    assert_eq!(a, b);
    Ok(())
}

#[tokio::test]
async fn model_refusal_surfaces_extraction_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("I'd rather not.")))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir()?;
    let config = AxiomConfig::load_from(&write_config(&dir, &server, 1))?;

    let runner = BenchmarkRunner::new(
        ChatCompletionsAdapter::from_config(&config.provider()),
        JsonSignalExtractor::new(),
    );
    let err = runner.run(config.scenarios()).await.unwrap_err();
    assert!(matches!(err, axiom_bench::BenchmarkError::Extraction { .. }));
    assert_eq!(err.scenario().map(|id| id.as_str()), Some("triage"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    Ok(())
}
