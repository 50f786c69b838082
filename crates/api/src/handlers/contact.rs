//! Handler for contact form intake.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use workaround_core::types::DocumentId;
use workaround_db::models::contact_message::ContactMessage;
use workaround_db::repositories::ContactMessageRepo;

use super::validate_request;
use crate::auth::service::normalize_email;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    #[validate(length(max = 100))]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: DocumentId,
    pub status: &'static str,
}

/// POST /api/v1/contact
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactReceipt>>)> {
    validate_request(&input)?;

    let message = ContactMessage {
        name: input.name,
        email: normalize_email(&input.email),
        message: input.message,
        company: input.company,
        topic: input.topic,
    };
    let id = ContactMessageRepo::create(state.store.as_ref(), &message).await?;
    tracing::info!(message_id = %id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContactReceipt {
                id,
                status: "received",
            },
        }),
    ))
}
