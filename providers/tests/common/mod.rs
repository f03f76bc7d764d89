//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::time::Duration;

use axiom_providers::ChatCompletionsAdapter;
use axiom_providers::retry::RetryPolicy;
use axiom_types::ModelId;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "sk-test-key";
pub const TEST_MODEL: &str = "gpt-test";

/// A Chat Completions body whose first choice says `content`.
pub fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": TEST_MODEL,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    })
}

/// Signals rendered the way a cooperative model would answer.
pub fn signals_reply(subjectivity: f64, purpose: f64) -> String {
    format!(
        "Assessment follows.\n```json\n{{\"impulses\": 1, \"elements\": 1, \"pressure\": 1, \
         \"subjectivity\": {subjectivity}, \"purpose\": {purpose}, \"time\": 1, \"n\": 1}}\n```"
    )
}

/// Mount a 200 response for every chat completion request.
pub async fn mount_chat_response(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(content)))
        .mount(server)
        .await;
}

/// Adapter pointed at `server` with millisecond retry delays.
pub fn adapter_for(server: &MockServer, api_key: Option<&str>) -> ChatCompletionsAdapter {
    ChatCompletionsAdapter::new(
        ModelId::from_static(TEST_MODEL),
        &format!("{}/v1", server.uri()),
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .with_retry_policy(fast_retry(2))
}

pub fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::default()
        .with_max_retries(max_retries)
        .with_delays(Duration::from_millis(1), Duration::from_millis(5))
        .without_jitter()
}
