//! Blocking client for the OpenAI-compatible chat-completion endpoint.
//!
//! One probe, one completion call, no retries. Transport and HTTP-status
//! failures surface as errors handled at the pipeline boundary; the target
//! file is never touched when this layer fails.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::prompt::ChatMessage;
use crate::infra::config::Config;

/// Probe timeout, independent of the configured request timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire value the server understands as "no generation cap".
const UNCAPPED_MAX_TOKENS: i64 = -1;

/// Seam between the pipeline and the inference server, injectable in tests.
pub trait CompletionBackend {
    /// Bounded-latency health check; network failures mean "unavailable",
    /// never an error.
    fn probe(&self) -> bool;

    /// One synchronous completion call returning the generated text.
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Request body for `POST {base_url}/chat/completions`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: i64,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client bound to one configured endpoint and model.
#[derive(Debug)]
pub struct LmClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
    max_tokens: i64,
}

impl LmClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config
                .max_tokens
                .map_or(UNCAPPED_MAX_TOKENS, i64::from),
        })
    }
}

impl CompletionBackend for LmClient {
    fn probe(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        match self.http.get(&url).timeout(PROBE_TIMEOUT).send() {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("server probe failed: {e}");
                false
            }
        }
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: 0.3,
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!(model = %self.model, %url, "sending completion request");

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .with_context(|| format!("Failed to reach {url}"))?;

        let resp = resp.error_for_status().inspect_err(|e| {
            error!("completion request rejected: {e}");
        })?;

        let parsed: ChatResponse = resp
            .json()
            .context("Failed to parse completion response")?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}
