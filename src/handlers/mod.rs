mod chat;
mod contact;
mod csrf;
mod generate;
mod health;
mod metrics;
mod session;
mod sitemap;

pub use chat::chat_handler;
pub use contact::contact_handler;
pub use csrf::csrf_token_handler;
pub use generate::generate_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use session::session_handler;
pub use sitemap::sitemap_handler;

use axum::http::HeaderMap;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::csp::security_headers;
use crate::session::throttle_key;
use crate::state::AppState;

pub const CLIENT_ID_HEADER: &str = "x-client-id";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/api/session", get(session_handler))
        .route("/api/csrf-token", get(csrf_token_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/generate", post(generate_handler))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

// Rate-limit key: the page's session id when sent, else the peer address
fn client_id(headers: &HeaderMap, peer: SocketAddr) -> String {
    let header = headers.get(CLIENT_ID_HEADER).and_then(|v| v.to_str().ok());
    throttle_key(header, peer.ip())
}
