use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use super::client_id;
use crate::completion::fetch_completion;
use crate::error::GatewayError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_TOTAL};
use crate::models::{ChatReply, ChatRequest};
use crate::prompts;
use crate::sanitize::sanitize;
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, GatewayError> {
    REQUEST_TOTAL.inc();

    if payload.message.trim().is_empty() {
        return Err(GatewayError::BadRequest("Message is empty"));
    }

    let client_id = client_id(&headers, peer);
    if state.chat_limiter.is_rate_limited(&client_id) {
        RATE_LIMITED_TOTAL.inc();
        info!(%client_id, "chat rate limit exceeded");
        return Err(GatewayError::RateLimited);
    }

    let message = sanitize(payload.message.as_str());
    let prompt = prompts::chat(&state.profile, &message);
    let completion = fetch_completion(&state, &client_id, prompt).await;

    Ok(Json(ChatReply {
        reply: completion.text,
        message,
        fallback: completion.fallback,
    }))
}
