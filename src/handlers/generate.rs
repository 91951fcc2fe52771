use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use std::net::SocketAddr;
use std::sync::Arc;

use super::client_id;
use crate::completion::fetch_completion;
use crate::metrics::REQUEST_TOTAL;
use crate::models::{GenerateReply, GenerateRequest};
use crate::state::AppState;

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<GenerateRequest>,
) -> Json<GenerateReply> {
    REQUEST_TOTAL.inc();

    let client_id = client_id(&headers, peer);
    let prompt = payload.prompt(&state.profile);
    let category = prompt.category;
    let completion = fetch_completion(&state, &client_id, prompt).await;

    Json(GenerateReply {
        category,
        text: completion.text,
        fallback: completion.fallback,
    })
}
