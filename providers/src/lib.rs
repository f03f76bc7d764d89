//! Network-facing implementations of the benchmark ports.
//!
//! [`ChatCompletionsAdapter`] talks to any OpenAI-compatible
//! `/chat/completions` endpoint and routes each call through
//! [`retry::RetryPolicy`]. [`JsonSignalExtractor`] pulls the seven engine
//! inputs out of the first JSON object in a reply.
//!
//! Failures are reported, never swallowed: transport problems, non-2xx
//! statuses and unreadable bodies each map onto an
//! [`AdapterError`](axiom_bench::AdapterError) variant and the runner decides
//! what they mean for the run.

mod chat;
mod extract;
pub mod retry;
mod wire;

use std::sync::OnceLock;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

pub use chat::ChatCompletionsAdapter;
pub use extract::JsonSignalExtractor;

/// Bytes of a failed response body kept for the error message.
const ERROR_BODY_LIMIT: usize = 32 * 1024;

/// Process-wide client. HTTPS endpoints get a client that refuses plain
/// HTTP; everything else (local servers, mocks) shares a permissive one.
pub fn http_client(https_only: bool) -> reqwest::Client {
    static STRICT: OnceLock<reqwest::Client> = OnceLock::new();
    static PERMISSIVE: OnceLock<reqwest::Client> = OnceLock::new();

    let slot = if https_only { &STRICT } else { &PERMISSIVE };
    slot.get_or_init(|| build_client(https_only)).clone()
}

fn build_client(https_only: bool) -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("axiom-bench/", env!("CARGO_PKG_VERSION"))),
    );

    let built = reqwest::Client::builder()
        .default_headers(headers)
        .https_only(https_only)
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(30))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .pool_max_idle_per_host(16)
        .build();

    built.unwrap_or_else(|e| {
        tracing::error!(error = %e, https_only, "HTTP client setup failed, using reqwest defaults");
        reqwest::Client::new()
    })
}

/// Drains an error response, keeping at most 32 KiB of it.
pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    let mut kept: Vec<u8> = Vec::new();
    let mut truncated = false;
    let mut chunks = response.bytes_stream();

    while let Some(Ok(chunk)) = chunks.next().await {
        let room = ERROR_BODY_LIMIT - kept.len();
        if chunk.len() > room {
            kept.extend_from_slice(&chunk[..room]);
            truncated = true;
            break;
        }
        kept.extend_from_slice(&chunk);
    }

    let text = String::from_utf8_lossy(&kept);
    if truncated {
        format!("{text}...(truncated)")
    } else {
        text.into_owned()
    }
}
