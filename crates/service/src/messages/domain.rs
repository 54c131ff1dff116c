use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A single board message as stored and served.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub user: String,
}

/// Fields supplied by clients on create and update; the id comes from the
/// store (create) or the request path (update).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageInput {
    pub text: String,
    pub user: String,
}

impl MessageInput {
    pub fn new(text: impl Into<String>, user: impl Into<String>) -> Self {
        Self { text: text.into(), user: user.into() }
    }

    pub fn into_message(self, id: i64) -> Message {
        Message { id, text: self.text, user: self.user }
    }
}

/// Next id for a new message: one past the largest id currently stored,
/// or 1 for an empty board. Gaps left by deletions are not reused.
pub fn next_id(messages: &[Message]) -> Result<i64, ServiceError> {
    match messages.iter().map(|m| m.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(ServiceError::IdExhausted(max)),
    }
}
