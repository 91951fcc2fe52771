use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::completion::{CompletionClient, CompletionError};
use crate::models::CompletionJob;
use crate::prompts::Prompt;
use crate::state::AppState;

// Background worker -> calls the completion service for queued jobs one by one
pub async fn completion_worker(mut rx: mpsc::Receiver<CompletionJob>, client: CompletionClient) {
    info!("completion worker started");

    while let Some(job) = rx.recv().await {
        debug!(
            category = ?job.prompt.category,
            max_tokens = job.prompt.max_tokens,
            "calling completion service"
        );

        let result = client.complete(&job.prompt).await;
        if let Err(e) = &result {
            warn!(error = %e, "completion service call failed");
        }

        // the caller may have gone away; nothing to do then
        let _ = job.response_tx.send(result);
    }

    info!("completion worker stopped");
}

// Queue a prompt and wait for the worker's answer
pub async fn submit(
    tx: &mpsc::Sender<CompletionJob>,
    prompt: Prompt,
) -> Result<String, CompletionError> {
    let (response_tx, response_rx) = oneshot::channel();

    tx.send(CompletionJob { prompt, response_tx })
        .await
        .map_err(|_| CompletionError::WorkerUnavailable)?;

    response_rx
        .await
        .map_err(|_| CompletionError::WorkerUnavailable)?
}

// Background task -> drops expired limiter records so one-off visitors don't pile up
pub async fn limiter_sweeper(state: Arc<AppState>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    // the first tick is immediate and there is nothing to sweep yet
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let chat = state.chat_limiter.prune();
        let completion = state.completion_limiter.prune();
        if chat + completion > 0 {
            debug!(
                chat,
                completion,
                remaining = state.chat_limiter.len() + state.completion_limiter.len(),
                "pruned expired rate limit records"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::rate_limit::RateLimiter;

    #[tokio::test]
    async fn submit_without_worker_is_unavailable() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let err = submit(&tx, Prompt::new("q", 1)).await.unwrap_err();
        assert!(matches!(err, CompletionError::WorkerUnavailable));
    }

    #[tokio::test]
    async fn dropped_reply_is_unavailable() {
        let (tx, mut rx) = mpsc::channel::<CompletionJob>(1);
        tokio::spawn(async move {
            // take the job and drop its reply channel
            let _ = rx.recv().await;
        });
        let err = submit(&tx, Prompt::new("q", 1)).await.unwrap_err();
        assert!(matches!(err, CompletionError::WorkerUnavailable));
    }

    #[tokio::test]
    async fn worker_reports_transport_errors() {
        // nothing listens on a port we just released
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = CompletionClient::new(
            reqwest::Client::new(),
            format!("http://127.0.0.1:{port}/v1/chat/completions"),
            "m",
        );
        let (tx, rx) = mpsc::channel(4);
        tokio::spawn(completion_worker(rx, client));

        let err = submit(&tx, Prompt::new("q", 1)).await.unwrap_err();
        assert!(matches!(err, CompletionError::Request(_)), "{err}");
    }

    #[tokio::test]
    async fn sweeper_empties_limiters_once_windows_pass() {
        let window = Duration::from_millis(200);
        let (tx, _rx) = mpsc::channel(1);
        let state = Arc::new(AppState::new(
            Profile::default(),
            RateLimiter::new(5, window),
            RateLimiter::new(5, window),
            tx,
        ));

        for i in 0..100 {
            state.chat_limiter.is_rate_limited(&format!("peer:10.0.0.{i}"));
            state.completion_limiter.is_rate_limited(&format!("peer:10.0.0.{i}"));
        }
        assert_eq!(state.chat_limiter.len(), 100);

        let sweeper = tokio::spawn(limiter_sweeper(state.clone(), Duration::from_millis(50)));
        tokio::time::sleep(Duration::from_millis(500)).await;
        sweeper.abort();

        assert_eq!(state.chat_limiter.len(), 0);
        assert_eq!(state.completion_limiter.len(), 0);
    }
}
