use axum::Json;

use crate::csrf::generate_token;
use crate::error::GatewayError;
use crate::models::TokenReply;

// Hands the page a fresh token for its hidden form field
pub async fn csrf_token_handler() -> Result<Json<TokenReply>, GatewayError> {
    let token = generate_token()?;
    Ok(Json(TokenReply { token }))
}
