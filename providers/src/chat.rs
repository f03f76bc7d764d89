use std::time::Duration;

use axiom_bench::{AdapterError, GenerateFut, ModelAdapter};
use axiom_config::ProviderConfig;
use axiom_types::{BenchmarkMode, ModelId};

use crate::retry::{RetryPolicy, SendError};
use crate::wire::{ChatRequest, ChatResponse};
use crate::{http_client, read_capped_error_body};

/// [`ModelAdapter`] for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Construction never fails. A missing API key surfaces as
/// [`AdapterError::Configuration`] on the first [`ModelAdapter::generate`].
pub struct ChatCompletionsAdapter {
    client: reqwest::Client,
    model: ModelId,
    endpoint: String,
    api_key: Option<String>,
    temperature: f64,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ChatCompletionsAdapter {
    pub fn new(
        model: ModelId,
        api_base: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let api_base = api_base.trim_end_matches('/');
        Self {
            client: http_client(api_base.starts_with("https://")),
            model,
            endpoint: format!("{api_base}/chat/completions"),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            temperature: 0.0,
            timeout,
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(provider: &ProviderConfig) -> Self {
        Self::new(
            provider.model(),
            provider.api_base(),
            provider.resolved_api_key(),
            provider.timeout(),
        )
        .with_temperature(provider.temperature())
        .with_retry_policy(RetryPolicy::default().with_max_retries(provider.max_retries()))
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn complete(&self, prompt: &str) -> Result<String, AdapterError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AdapterError::Configuration(format!(
                "no API key configured for {}; set provider.api_key or {}",
                self.model,
                axiom_config::API_KEY_ENV
            )));
        };

        let body = ChatRequest::user(self.model.as_str(), prompt, self.temperature);
        let sent = self
            .retry
            .send(
                || {
                    self.client
                        .post(&self.endpoint)
                        .bearer_auth(api_key)
                        .json(&body)
                },
                self.timeout,
            )
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(SendError::Status(response)) => {
                let status = response.status().as_u16();
                let body = read_capped_error_body(response).await;
                return Err(AdapterError::Http { status, body });
            }
            Err(SendError::Transport { attempts: 1, source }) => {
                return Err(AdapterError::Transport(source.to_string()));
            }
            Err(SendError::Transport { attempts, source }) => {
                return Err(AdapterError::Transport(format!(
                    "{source} (after {attempts} attempts)"
                )));
            }
        };

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::InvalidResponse(e.to_string()))?;
        parsed.into_text().ok_or_else(|| {
            AdapterError::InvalidResponse("response has no choices[0].message.content".to_string())
        })
    }
}

impl std::fmt::Debug for ChatCompletionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsAdapter")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &if self.api_key.is_some() { "[REDACTED]" } else { "None" },
            )
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ModelAdapter for ChatCompletionsAdapter {
    fn model_id(&self) -> &ModelId {
        &self.model
    }

    fn generate<'a>(&'a self, prompt: &'a str, mode: &'a BenchmarkMode) -> GenerateFut<'a> {
        tracing::debug!(model = %self.model, %mode, "requesting chat completion");
        Box::pin(self.complete(prompt))
    }
}
