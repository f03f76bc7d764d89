//! Chat Completions adapter against a mock server

use axiom_bench::{AdapterError, ModelAdapter};
use axiom_types::{BenchmarkMode, ModelId};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TEST_KEY, TEST_MODEL, adapter_for, chat_body, mount_chat_response};

#[tokio::test]
async fn returns_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
        .and(body_partial_json(serde_json::json!({
            "model": TEST_MODEL,
            "messages": [{"role": "user", "content": "hello"}],
            "temperature": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = adapter_for(&server, Some(TEST_KEY));
    let text = adapter
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap();
    assert_eq!(text, "hi there");
    assert_eq!(adapter.model_id().as_str(), TEST_MODEL);
}

#[tokio::test]
async fn missing_key_is_configuration_error_without_request() {
    let server = MockServer::start().await;
    mount_chat_response(&server, "unused").await;

    let adapter = adapter_for(&server, None);
    let err = adapter
        .generate("hello", &BenchmarkMode::AxiomGuided)
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::Configuration(_)), "{err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request: unknown model"))
        .expect(1)
        .mount(&server)
        .await;

    let err = adapter_for(&server, Some(TEST_KEY))
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap_err();

    match err {
        AdapterError::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("unknown model"));
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn unavailable_then_success_is_retried_with_same_idempotency_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_chat_response(&server, "recovered").await;

    let text = adapter_for(&server, Some(TEST_KEY))
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap();
    assert_eq!(text, "recovered");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let key = |i: usize| requests[i].headers.get("idempotency-key").cloned();
    assert!(key(0).is_some());
    assert_eq!(key(0), key(1));
    let count = |i: usize| {
        requests[i]
            .headers
            .get("x-retry-count")
            .and_then(|v| v.to_str().ok().map(str::to_string))
    };
    assert_eq!(count(0).as_deref(), Some("0"));
    assert_eq!(count(1).as_deref(), Some("1"));
}

#[tokio::test]
async fn server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(3)
        .mount(&server)
        .await;

    let err = adapter_for(&server, Some(TEST_KEY))
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::Http { status: 500, .. }), "{err:?}");
}

#[tokio::test]
async fn unparseable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = adapter_for(&server, Some(TEST_KEY))
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
        )
        .mount(&server)
        .await;

    let err = adapter_for(&server, Some(TEST_KEY))
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let adapter = axiom_providers::ChatCompletionsAdapter::new(
        ModelId::from_static(TEST_MODEL),
        "http://127.0.0.1:1/v1",
        Some(TEST_KEY.to_string()),
        std::time::Duration::from_secs(2),
    )
    .with_retry_policy(crate::common::fast_retry(1));

    let err = adapter
        .generate("hello", &BenchmarkMode::Baseline)
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::Transport(_)), "{err:?}");
}
