//! Contact form handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::AppState;
use portfolio_common::{
    db::Repository,
    errors::{AppError, Result},
    metrics,
    schema::{parse_record, Message, Record, ValidationFailure},
};

/// Acknowledgment of a stored message
#[derive(Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
    pub id: String,
}

/// Validate and store a visitor's message.
///
/// The body is taken as untyped JSON so that malformed JSON, missing
/// fields and constraint violations all surface as 422 with field detail.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let message = payload
        .map_err(|rejection| ValidationFailure::single("body", "json", rejection.body_text()))
        .and_then(|Json(payload)| parse_record::<Message>(payload))
        .map_err(|failure| {
            metrics::record_validation_failure(Message::COLLECTION);
            AppError::from(failure)
        })?;

    let repo = Repository::<Message>::from_state(state.db.as_ref())?;
    let id = repo.insert(&message).await?;

    metrics::record_message_received();
    tracing::info!(id = %id, "Contact message stored");

    Ok(Json(ContactResponse { status: "ok", id }))
}
