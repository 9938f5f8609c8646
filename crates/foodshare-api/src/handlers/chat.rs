//! Chat handlers
//!
//! Endpoints for opening conversations, reading threads, posting messages,
//! and the conversation overview.

use axum::{
    extract::{Query, State},
    Json,
};
use foodshare_core::Snowflake;
use foodshare_service::{
    ConversationResponse, MessageResponse, MessagingService, SendMessageRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /chat
///
/// Either `conversation_id` alone, or `recipient_id` with an optional
/// `listing_id` to open (or re-open) a thread.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ChatQuery {
    pub conversation_id: Option<String>,
    pub recipient_id: Option<String>,
    pub listing_id: Option<String>,
}

/// Chat thread: the conversation ID plus its messages in chronological order
#[derive(Debug, serde::Serialize)]
pub struct ChatThreadResponse {
    pub conversation_id: String,
    pub messages: Vec<MessageResponse>,
}

/// Open or fetch a chat thread.
///
/// Fetching a thread marks the caller's incoming messages as read.
///
/// GET /chat?recipient_id={id}&listing_id={id}
/// GET /chat?conversation_id={id}
pub async fn get_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ChatQuery>,
) -> ApiResult<Json<ChatThreadResponse>> {
    let service = MessagingService::new(state.service_context());

    let conversation_id = match (query.conversation_id, query.recipient_id) {
        (Some(raw), _) => parse_id(&raw, "conversation_id")?,
        (None, Some(raw)) => {
            let recipient_id = parse_id(&raw, "recipient_id")?;
            let listing_id = query
                .listing_id
                .as_deref()
                .map(|raw| parse_id(raw, "listing_id"))
                .transpose()?;
            let conversation = service
                .get_or_create_conversation(auth.user_id, recipient_id, listing_id)
                .await?;
            conversation.id
        }
        (None, None) => {
            return Err(ApiError::invalid_query(
                "Either conversation_id or recipient_id is required",
            ))
        }
    };

    let messages = service
        .messages_for_conversation(auth.user_id, conversation_id)
        .await?;

    Ok(Json(ChatThreadResponse {
        conversation_id: conversation_id.to_string(),
        messages,
    }))
}

/// Post a message.
///
/// Addressed by `conversation_id`, or by `recipient_id` (plus optional
/// `listing_id`) to create the conversation on first contact.
///
/// POST /chat
pub async fn post_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessagingService::new(state.service_context());

    let conversation_id = match (request.conversation_id, request.recipient_id) {
        (Some(raw), _) => parse_id(&raw, "conversation_id")?,
        (None, Some(raw)) => {
            let recipient_id = parse_id(&raw, "recipient_id")?;
            let listing_id = request
                .listing_id
                .as_deref()
                .map(|raw| parse_id(raw, "listing_id"))
                .transpose()?;
            let conversation = service
                .get_or_create_conversation(auth.user_id, recipient_id, listing_id)
                .await?;
            conversation.id
        }
        (None, None) => {
            return Err(ApiError::invalid_body(
                "Either conversation_id or recipient_id is required",
            ))
        }
    };

    let message = service
        .post_message(auth.user_id, conversation_id, request.content)
        .await?;
    Ok(Json(message))
}

/// Get the caller's conversation overview, newest thread first
///
/// GET /conversations
pub async fn get_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let service = MessagingService::new(state.service_context());
    let conversations = service.conversations(auth.user_id).await?;
    Ok(Json(conversations))
}

fn parse_id(raw: &str, name: &str) -> ApiResult<Snowflake> {
    raw.parse()
        .map_err(|_| ApiError::invalid_query(format!("Invalid {name} format")))
}
