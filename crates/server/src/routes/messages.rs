use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::messages::{Message, MessageInput};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Serialize, Debug)]
pub struct MessageEnvelope {
    pub message: Message,
}

#[derive(Serialize, Debug)]
pub struct MessageList {
    pub messages: Vec<Message>,
}

#[derive(Serialize, Debug)]
pub struct StatusMessage {
    pub message: &'static str,
}

impl StatusMessage {
    fn json(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Post a new message; the id is the next one after the current maximum.
#[utoipa::path(
    post, path = "/messages/", tag = "Post",
    params(
        ("text" = String, Query, description = "Message text"),
        ("user" = String, Query, description = "Author name"),
    ),
    responses((status = 201, description = "Created", body = String, content_type = "text/plain"))
)]
pub async fn send_message(
    State(state): State<AppState>,
    Query(input): Query<MessageInput>,
) -> Result<(StatusCode, String), ApiError> {
    let msg = state.messages.create(input).await?;
    info!(id = msg.id, user = %msg.user, "message sent");
    Ok((StatusCode::CREATED, format!("Message sent successfully. ID: {}", msg.id)))
}

#[utoipa::path(
    get, path = "/messages/{message_id}", tag = "Get",
    params(("message_id" = i64, Path, description = "Message id")),
    responses(
        (status = 200, description = "The message, or an error body when missing", body = crate::openapi::MessageEnvelopeDoc),
        (status = 404, description = "Missing message (conventional mode)", body = crate::openapi::ErrorDoc),
    )
)]
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    match state.messages.get(message_id).await {
        Some(message) => Ok(Json(MessageEnvelope { message })),
        None => Err(ApiError::message_not_found(state.not_found)),
    }
}

#[utoipa::path(
    get, path = "/messages/", tag = "Get",
    responses((status = 200, description = "Every message in stored order", body = crate::openapi::MessageListDoc))
)]
pub async fn get_all_messages(State(state): State<AppState>) -> Json<MessageList> {
    Json(MessageList { messages: state.messages.list().await })
}

/// Full replace of an existing message; the path id is kept.
#[utoipa::path(
    put, path = "/messages/{message_id}", tag = "Put",
    params(
        ("message_id" = i64, Path, description = "Message id"),
        ("text" = String, Query, description = "New text"),
        ("user" = String, Query, description = "New author name"),
    ),
    responses(
        (status = 200, description = "Updated, or an error body when missing", body = crate::openapi::StatusMessageDoc),
        (status = 404, description = "Missing message (conventional mode)", body = crate::openapi::ErrorDoc),
    )
)]
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Query(input): Query<MessageInput>,
) -> Result<Json<StatusMessage>, ApiError> {
    match state.messages.update(message_id, input).await {
        Ok(_) => {
            info!(id = message_id, "message updated");
            Ok(StatusMessage::json("Message updated successfully"))
        }
        Err(e) if e.is_not_found() => Err(ApiError::message_not_found(state.not_found)),
        Err(e) => Err(e.into()),
    }
}

/// Always reports success, whether or not the id existed.
#[utoipa::path(
    delete, path = "/messages/{message_id}", tag = "Delete",
    params(("message_id" = i64, Path, description = "Message id")),
    responses((status = 200, description = "Deleted (or nothing to delete)", body = crate::openapi::StatusMessageDoc))
)]
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Json<StatusMessage>, ApiError> {
    let existed = state.messages.delete(message_id).await?;
    info!(id = message_id, existed, "message delete requested");
    Ok(StatusMessage::json("Message deleted successfully"))
}

#[utoipa::path(
    delete, path = "/messages/", tag = "Delete",
    responses((status = 200, description = "Board cleared", body = crate::openapi::StatusMessageDoc))
)]
pub async fn delete_all_messages(State(state): State<AppState>) -> Result<Json<StatusMessage>, ApiError> {
    let dropped = state.messages.clear().await?;
    info!(dropped, "all messages deleted");
    Ok(StatusMessage::json("All messages deleted successfully"))
}
