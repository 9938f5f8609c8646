//! Message box handlers
//!
//! Endpoints for the caller's inbox/outbox and per-listing message history.

use axum::{
    extract::{Query, State},
    Json,
};
use foodshare_service::{MessageResponse, MessagingService};

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /messages
#[derive(Debug, Default, serde::Deserialize)]
pub struct MessagesQuery {
    /// Box selector: `inbox` (default) or `outbox`
    #[serde(rename = "type")]
    pub box_type: Option<String>,
    /// Restrict to conversations anchored to this listing
    pub listing_id: Option<String>,
}

/// Get the caller's messages
///
/// GET /messages?type=inbox|outbox
/// GET /messages?listing_id={id}
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MessagesQuery>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessagingService::new(state.service_context());

    if let Some(listing_id) = query.listing_id {
        let listing_id = listing_id
            .parse()
            .map_err(|_| ApiError::invalid_query("Invalid listing_id format"))?;
        let messages = service.messages_for_listing(auth.user_id, listing_id).await?;
        return Ok(Json(messages));
    }

    let messages = match query.box_type.as_deref() {
        Some("inbox") | None => service.inbox(auth.user_id).await?,
        Some("outbox") => service.outbox(auth.user_id).await?,
        Some(other) => {
            return Err(ApiError::invalid_query(format!(
                "Unknown message box: {other}"
            )))
        }
    };

    Ok(Json(messages))
}
