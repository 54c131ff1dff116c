use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::messages::domain::{Message, MessageInput};

/// Trait abstraction for message storage.
/// Every mutating call is persisted before it returns.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// All messages in stored order.
    async fn list(&self) -> Vec<Message>;
    async fn get(&self, id: i64) -> Option<Message>;
    /// Store a new message under the next free id.
    async fn create(&self, input: MessageInput) -> Result<Message, ServiceError>;
    /// Full replace of the message with `id`; `ServiceError::NotFound` when absent.
    async fn update(&self, id: i64, input: MessageInput) -> Result<Message, ServiceError>;
    /// Remove the message with `id`; returns whether one existed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    /// Remove every message; returns how many were dropped.
    async fn clear(&self) -> Result<usize, ServiceError>;
}
