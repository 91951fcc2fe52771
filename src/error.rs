use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::csrf::TokenError;
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Too many requests. Please wait a moment before trying again.")]
    RateLimited,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Some fields are invalid")]
    Validation(FieldErrors),

    // no safe fallback exists for a missing random source
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Token(_) | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = match &self {
            GatewayError::Validation(fields) => json!({ "error": self.to_string(), "fields": fields }),
            // keep internals out of the page
            GatewayError::Token(_) | GatewayError::Internal(_) => json!({ "error": "Internal server error" }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
