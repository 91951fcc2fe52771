use axum::Json;

use crate::models::SessionReply;
use crate::session::generate_client_id;

// A page keeps this for its lifetime and sends it back as `x-client-id`
pub async fn session_handler() -> Json<SessionReply> {
    Json(SessionReply { client_id: generate_client_id() })
}
