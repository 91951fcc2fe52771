use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::{Args, DEFAULT_SITE_URL};
use crate::models::CompletionJob;
use crate::profile::Profile;
use crate::rate_limit::RateLimiter;
// app's shared state

pub struct AppState {
    pub profile: Profile,
    pub site_url: String, // public origin used in the sitemap
    pub chat_limiter: RateLimiter,       // chat messages per client
    pub completion_limiter: RateLimiter, // completion calls per client
    pub completion_tx: mpsc::Sender<CompletionJob>,
}

impl AppState {
    pub fn new(
        profile: Profile,
        chat_limiter: RateLimiter,
        completion_limiter: RateLimiter,
        completion_tx: mpsc::Sender<CompletionJob>,
    ) -> Self {
        Self {
            profile,
            site_url: DEFAULT_SITE_URL.to_string(),
            chat_limiter,
            completion_limiter,
            completion_tx,
        }
    }

    pub fn from_args(args: &Args, profile: Profile, completion_tx: mpsc::Sender<CompletionJob>) -> Self {
        let window = Duration::from_secs(args.rate_window);
        let mut state = Self::new(
            profile,
            RateLimiter::new(args.chat_rate_limit, window),
            RateLimiter::new(args.completion_rate_limit, window),
            completion_tx,
        );
        state.site_url = args.site_url.trim_end_matches('/').to_string();
        state
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::completion::CompletionClient;
    use crate::worker::completion_worker;
    use axum::http::StatusCode;
    use axum::{Router, routing::post};
    use std::sync::Arc;

    // Serve a fixed completion answer on a random local port; returns its URL
    pub async fn spawn_stub(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || async move {
                (status, [(axum::http::header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    // State wired to a live worker talking to `url`
    pub fn test_state(url: &str, chat_limit: u32, completion_limit: u32) -> Arc<AppState> {
        let client = CompletionClient::new(reqwest::Client::new(), url, "test-model");
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(completion_worker(rx, client));

        let window = Duration::from_secs(60);
        Arc::new(AppState::new(
            Profile::default(),
            RateLimiter::new(chat_limit, window),
            RateLimiter::new(completion_limit, window),
            tx,
        ))
    }
}
