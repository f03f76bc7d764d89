//! Retry policy for chat completion requests.
//!
//! Status codes 408, 409, 429 and 5xx are retried, as are connect and timeout
//! failures. A server `x-should-retry` header overrides the status check, and
//! `Retry-After-Ms` / `Retry-After` replace the computed backoff when they
//! fall inside `(0, 60s)`.
//!
//! Every attempt of one logical request shares an `Idempotency-Key` and
//! carries its attempt index in `X-Retry-Count`.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};
use uuid::Uuid;

const SERVER_DELAY_LIMIT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    delay_cap: Duration,
    /// Fraction by which a computed delay may be shortened at random.
    jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            delay_cap: Duration::from_secs(8),
            jitter: 0.25,
        }
    }
}

/// Why [`RetryPolicy::send`] gave up.
#[derive(Debug)]
pub enum SendError {
    /// Last response was non-2xx and either not retryable or out of retries.
    Status(Response),
    Transport {
        attempts: u32,
        source: reqwest::Error,
    },
}

impl RetryPolicy {
    /// Retries allowed after the first attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_delays(mut self, base: Duration, cap: Duration) -> Self {
        self.base_delay = base;
        self.delay_cap = cap.max(base);
        self
    }

    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = 0.0;
        self
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Wait before the attempt that follows `retry_index` failed retries.
    #[must_use]
    pub fn delay(&self, retry_index: u32, headers: Option<&HeaderMap>) -> Duration {
        if let Some(requested) = headers.and_then(server_delay) {
            return requested;
        }
        let exponent = retry_index.min(30) as i32;
        let backoff = (self.base_delay.as_secs_f64() * 2f64.powi(exponent))
            .min(self.delay_cap.as_secs_f64());
        let shrink = rand::random::<f64>() * self.jitter;
        Duration::from_secs_f64(backoff * (1.0 - shrink))
    }

    /// Sends the request produced by `build`, rebuilding it for each attempt.
    pub async fn send<F>(&self, build: F, timeout: Duration) -> Result<Response, SendError>
    where
        F: Fn() -> RequestBuilder,
    {
        let key = idempotency_key();
        let mut retries = 0;

        loop {
            let last_chance = retries >= self.max_retries;
            let result = build()
                .header("X-Retry-Count", retries.to_string())
                .header("Idempotency-Key", &key)
                .timeout(timeout)
                .send()
                .await;

            let wait = match result {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    if last_chance || !is_retryable_status(response.status(), response.headers()) {
                        return Err(SendError::Status(response));
                    }
                    let wait = self.delay(retries, Some(response.headers()));
                    tracing::debug!(
                        status = %response.status(),
                        retry = retries + 1,
                        wait_ms = wait.as_millis(),
                        "retrying after error status"
                    );
                    wait
                }
                Err(source) => {
                    if last_chance || !(source.is_connect() || source.is_timeout()) {
                        return Err(SendError::Transport {
                            attempts: retries + 1,
                            source,
                        });
                    }
                    let wait = self.delay(retries, None);
                    tracing::debug!(
                        error = %source,
                        retry = retries + 1,
                        wait_ms = wait.as_millis(),
                        "retrying after transport failure"
                    );
                    wait
                }
            };

            tokio::time::sleep(wait).await;
            retries += 1;
        }
    }
}

/// Delay the server asked for, via `Retry-After-Ms` (fractional millis) or
/// `Retry-After` (whole seconds).
#[must_use]
pub fn server_delay(headers: &HeaderMap) -> Option<Duration> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let millis = header("retry-after-ms")
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|ms| *ms > 0.0 && *ms < SERVER_DELAY_LIMIT.as_secs_f64() * 1000.0)
        .map(|ms| Duration::from_secs_f64(ms / 1000.0));
    millis.or_else(|| {
        header("retry-after")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .filter(|d| !d.is_zero() && *d < SERVER_DELAY_LIMIT)
    })
}

#[must_use]
pub fn is_retryable_status(status: StatusCode, headers: &HeaderMap) -> bool {
    let hint = headers
        .get("x-should-retry")
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase);
    match hint.as_deref() {
        Some("true") => true,
        Some("false") => false,
        _ => matches!(status.as_u16(), 408 | 409 | 429 | 500..=599),
    }
}

fn idempotency_key() -> String {
    format!("axiom-retry-{}", Uuid::new_v4())
}
