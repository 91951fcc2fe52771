use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::sitemap;
use crate::state::AppState;

pub async fn sitemap_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let xml = sitemap::render(&state.site_url, chrono::Utc::now().date_naive());
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}
