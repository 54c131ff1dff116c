use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::ServiceError;
use crate::messages::domain::{next_id, Message, MessageInput};
use crate::messages::repository::MessageRepository;
use crate::storage::json_vec_store::JsonVecStore;

/// File-backed message board.
/// Keeps the ordered message list in memory, persisted as a JSON array.
pub struct MessageStore {
    store: JsonVecStore<Message>,
}

impl MessageStore {
    /// Load the board from the given file path. A missing file means an empty board.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonVecStore::<Message>::open(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub async fn len(&self) -> usize {
        self.store.read(|items| items.len()).await
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list(&self) -> Vec<Message> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> Option<Message> {
        self.store
            .read(|items| items.iter().find(|m| m.id == id).cloned())
            .await
    }

    pub async fn create(&self, input: MessageInput) -> Result<Message, ServiceError> {
        let created = self
            .store
            .update(|items| {
                let msg = input.into_message(next_id(items)?);
                items.push(msg.clone());
                Ok(msg)
            })
            .await?;
        debug!(id = created.id, user = %created.user, "message created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: MessageInput) -> Result<Message, ServiceError> {
        let updated = self
            .store
            .update(|items| {
                let slot = items
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or_else(|| ServiceError::not_found("message"))?;
                *slot = input.into_message(id);
                Ok(slot.clone())
            })
            .await?;
        debug!(id, "message updated");
        Ok(updated)
    }

    /// Drops every message carrying `id`. The file is rewritten even when
    /// nothing matched.
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let existed = self
            .store
            .update(|items| {
                let before = items.len();
                items.retain(|m| m.id != id);
                Ok(items.len() != before)
            })
            .await?;
        debug!(id, existed, "message delete");
        Ok(existed)
    }

    pub async fn clear(&self) -> Result<usize, ServiceError> {
        let dropped = self
            .store
            .update(|items| {
                let n = items.len();
                items.clear();
                Ok(n)
            })
            .await?;
        debug!(dropped, "all messages deleted");
        Ok(dropped)
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageStore {
    async fn list(&self) -> Vec<Message> { self.list().await }
    async fn get(&self, id: i64) -> Option<Message> { self.get(id).await }
    async fn create(&self, input: MessageInput) -> Result<Message, ServiceError> { self.create(input).await }
    async fn update(&self, id: i64, input: MessageInput) -> Result<Message, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: i64) -> Result<bool, ServiceError> { self.delete(id).await }
    async fn clear(&self) -> Result<usize, ServiceError> { self.clear().await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("svc_messages_{}.json", Uuid::new_v4()))
    }

    fn ids(list: &[Message]) -> Vec<i64> {
        list.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;

        let first = store.create(MessageInput::new("hi", "bob")).await?;
        assert_eq!(first, Message { id: 1, text: "hi".into(), user: "bob".into() });
        let second = store.create(MessageInput::new("yo", "amy")).await?;
        assert_eq!(second.id, 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn ids_derive_from_current_max() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        store.create(MessageInput::new("a", "u")).await?;
        store.create(MessageInput::new("b", "u")).await?;

        store.delete(1).await?;
        let third = store.create(MessageInput::new("c", "u")).await?;
        assert_eq!(third.id, 3);
        assert_eq!(ids(&store.list().await), vec![2, 3]);

        // removing the top id makes it available again
        store.delete(3).await?;
        assert_eq!(store.create(MessageInput::new("d", "u")).await?.id, 3);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_and_update() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        store.create(MessageInput::new("a", "u1")).await?;
        store.create(MessageInput::new("b", "u2")).await?;

        assert_eq!(store.get(2).await.map(|m| m.text), Some("b".to_string()));
        assert!(store.get(9).await.is_none());

        let updated = store.update(1, MessageInput::new("edited", "u3")).await?;
        assert_eq!(updated, Message { id: 1, text: "edited".into(), user: "u3".into() });
        // update keeps position in the list
        assert_eq!(ids(&store.list().await), vec![1, 2]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_leaves_board_unchanged() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        store.create(MessageInput::new("a", "u")).await?;
        let before = store.list().await;

        let res = store.update(42, MessageInput::new("x", "y")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list().await, before);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_noop_but_persists() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        assert!(!store.delete(5).await?);
        // file written even though nothing matched
        let on_disk: Vec<Message> = serde_json::from_slice(&tokio::fs::read(&tmp).await?)?;
        assert!(on_disk.is_empty());

        store.create(MessageInput::new("a", "u")).await?;
        assert!(!store.delete(5).await?);
        assert_eq!(store.len().await, 1);
        assert!(store.delete(1).await?);
        assert_eq!(store.len().await, 0);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn clear_then_reload_is_empty() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        store.create(MessageInput::new("a", "u")).await?;
        store.create(MessageInput::new("b", "u")).await?;
        assert_eq!(store.clear().await?, 2);
        assert!(store.list().await.is_empty());

        let reloaded = MessageStore::open(&tmp).await?;
        assert!(reloaded.list().await.is_empty());
        assert_eq!(reloaded.create(MessageInput::new("c", "u")).await?.id, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn reload_round_trips_messages_in_order() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        for (text, user) in [("one", "ann"), ("two", "ben"), ("three", "cat")] {
            store.create(MessageInput::new(text, user)).await?;
        }
        store.update(2, MessageInput::new("deux", "ben")).await?;
        let written = store.list().await;

        let reloaded = MessageStore::open(&tmp).await?;
        assert_eq!(reloaded.list().await, written);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = MessageStore::open(&tmp).await?;
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(MessageInput::new(format!("m{i}"), "load")).await
            }));
        }
        for h in handles {
            h.await??;
        }
        let mut got = ids(&store.list().await);
        got.sort_unstable();
        assert_eq!(got, (1..=16).collect::<Vec<_>>());

        let reloaded = MessageStore::open(&tmp).await?;
        assert_eq!(reloaded.len().await, 16);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
