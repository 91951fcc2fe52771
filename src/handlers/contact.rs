use axum::Json;
use tracing::{debug, info};

use crate::csrf::generate_token;
use crate::error::GatewayError;
use crate::metrics::{CONTACT_TOTAL, REQUEST_TOTAL};
use crate::models::ContactReceipt;
use crate::validation::ContactForm;

// The `_csrf` field is logged, never checked: no verifier exists for it.
pub async fn contact_handler(
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactReceipt>, GatewayError> {
    REQUEST_TOTAL.inc();

    form.validate().map_err(GatewayError::Validation)?;

    let submission = form.sanitized();
    debug!(csrf_present = form.csrf.is_some(), "contact form token not verified");
    // sender details stay out of the default log level
    debug!(name = %submission.name, email = %submission.email, "contact form sender");
    info!(
        subject_len = form.subject.chars().count(),
        message_len = form.message.chars().count(),
        "contact form received"
    );
    CONTACT_TOTAL.inc();

    // rotate for the next submission
    let next_token = generate_token()?;

    Ok(Json(ContactReceipt { status: "received", submission, next_token }))
}
