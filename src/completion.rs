use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::{COMPLETION_LATENCY, FALLBACK_TOTAL, RATE_LIMITED_TOTAL};
use crate::models::{ChatMessage, CompletionRequest, CompletionResponse};
use crate::prompts::{Prompt, SYSTEM_PROMPT};
use crate::state::AppState;
use crate::worker;

pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("completion service returned no content")]
    EmptyResponse,

    #[error("completion worker unavailable")]
    WorkerUnavailable,
}

// Client for the remote chat completion proxy
#[derive(Clone, Debug)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self { http, url: url.into(), model: model.into() }
    }

    pub fn request_body(&self, prompt: &Prompt) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".into(), content: SYSTEM_PROMPT.into() },
                ChatMessage { role: "user".into(), content: prompt.text.clone() },
            ],
            max_tokens: prompt.max_tokens,
            temperature: TEMPERATURE,
        }
    }

    pub async fn complete(&self, prompt: &Prompt) -> Result<String, CompletionError> {
        let res = self
            .http
            .post(self.url.as_str())
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status: status.as_u16(), detail });
        }

        let body: CompletionResponse = res.json().await?;
        body.first_content().ok_or(CompletionError::EmptyResponse)
    }
}

// Text handed back to the page, and whether it is the canned answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub fallback: bool,
}

impl Completion {
    fn fallback(prompt: &Prompt) -> Self {
        FALLBACK_TOTAL.inc();
        Self { text: prompt.fallback().to_string(), fallback: true }
    }
}

/// Answers `prompt` through the completion service, or with the prompt
/// category's fallback when the client is throttled or the call fails.
///
/// The limiter is consulted and updated before the first `.await`.
pub async fn fetch_completion(state: &AppState, client_id: &str, prompt: Prompt) -> Completion {
    if state.completion_limiter.is_rate_limited(client_id) {
        RATE_LIMITED_TOTAL.inc();
        warn!(client_id, "completion rate limit exceeded, answering with fallback");
        return Completion::fallback(&prompt);
    }

    let start = Instant::now();
    let category = prompt.category;

    match worker::submit(&state.completion_tx, prompt.clone()).await {
        Ok(text) => {
            COMPLETION_LATENCY.observe(start.elapsed().as_secs_f64());
            debug!(?category, "completion served");
            Completion { text, fallback: false }
        }
        Err(e) => {
            warn!(?category, error = %e, "completion failed, answering with fallback");
            Completion::fallback(&prompt)
        }
    }
}
