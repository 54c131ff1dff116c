use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, error};

use crate::errors::ServiceError;

/// Generic JSON file-backed ordered list store.
///
/// Holds a `Vec<T>` in memory and mirrors it to a JSON array on disk. The
/// whole file is rewritten after every mutation: serialized to a sibling temp
/// file first, then renamed over the backing file, so a crash mid-write never
/// leaves a truncated list behind.
///
/// Mutations hold the write lock across the change and the rewrite, so
/// concurrent writers are applied one at a time and in the same order on disk.
pub struct JsonVecStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T> JsonVecStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Load the list from `path`. A missing file yields an empty list and is
    /// not created until the first mutation; an unparsable file is an error.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| ServiceError::Corrupt {
                path: file_path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %file_path.display(), count = items.len(), "json store loaded");
        Ok(Self { inner: RwLock::new(items), file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of every item, in stored order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// Run a read-only query against the current list.
    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let items = self.inner.read().await;
        f(&items[..])
    }

    /// Apply a mutation and persist the result.
    ///
    /// If `f` fails nothing is written. If `f` succeeds but the rewrite
    /// fails, the in-memory list is restored so it never diverges from disk.
    pub async fn update<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut items = self.inner.write().await;
        let before = items.clone();
        let out = match f(&mut *items) {
            Ok(out) => out,
            Err(e) => {
                *items = before;
                return Err(e);
            }
        };
        if let Err(e) = self.persist(&items).await {
            error!(path = %self.file_path.display(), error = %e, "persist failed; rolling back");
            *items = before;
            return Err(e);
        }
        Ok(out)
    }

    async fn persist(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items)?;
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, &self.file_path).await?;
        debug!(path = %self.file_path.display(), count = items.len(), bytes = data.len(), "json store persisted");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("store"));
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        n: u32,
    }

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_vec_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_starts_empty_and_is_not_created() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("missing");
        let store = JsonVecStore::<Item>::open(&tmp).await?;
        assert!(store.list().await.is_empty());
        assert!(fs::metadata(&tmp).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn update_persists_in_order_and_reloads() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("order");
        let store = JsonVecStore::<Item>::open(&tmp).await?;
        for n in [3, 1, 2] {
            store.update(|v| { v.push(Item { n }); Ok(()) }).await?;
        }

        let reloaded = JsonVecStore::<Item>::open(&tmp).await?;
        let ns: Vec<u32> = reloaded.list().await.into_iter().map(|i| i.n).collect();
        assert_eq!(ns, vec![3, 1, 2]);
        assert!(fs::metadata(store.temp_path()).await.is_err(), "temp file must be renamed away");

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_is_pretty_printed_with_two_spaces() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("pretty");
        let store = JsonVecStore::<Item>::open(&tmp).await?;
        store.update(|v| { v.push(Item { n: 7 }); Ok(()) }).await?;

        let text = fs::read_to_string(&tmp).await?;
        assert_eq!(text, "[\n  {\n    \"n\": 7\n  }\n]");

        store.update(|v| { v.clear(); Ok(()) }).await?;
        assert_eq!(fs::read_to_string(&tmp).await?, "[]");

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("corrupt");
        fs::write(&tmp, b"{ not json").await?;
        let res = JsonVecStore::<Item>::open(&tmp).await;
        assert!(matches!(res, Err(ServiceError::Corrupt { .. })));
        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_closure_leaves_list_and_file_untouched() -> Result<(), anyhow::Error> {
        let tmp = tmp_path("closure_err");
        let store = JsonVecStore::<Item>::open(&tmp).await?;
        store.update(|v| { v.push(Item { n: 1 }); Ok(()) }).await?;
        let on_disk = fs::read(&tmp).await?;

        let res: Result<(), _> = store
            .update(|v| {
                v.push(Item { n: 2 });
                Err(ServiceError::not_found("item"))
            })
            .await;
        assert!(res.unwrap_err().is_not_found());
        assert_eq!(store.list().await, vec![Item { n: 1 }]);
        assert_eq!(fs::read(&tmp).await?, on_disk);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn persist_failure_rolls_back_memory() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_vec_store_dir_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).await?;
        let store = JsonVecStore::<Item>::open(dir.join("items.json")).await?;
        store.update(|v| { v.push(Item { n: 1 }); Ok(()) }).await?;

        fs::remove_dir_all(&dir).await?;
        let res = store.update(|v| { v.push(Item { n: 2 }); Ok(()) }).await;
        assert!(matches!(res, Err(ServiceError::Io(_))));
        assert_eq!(store.list().await, vec![Item { n: 1 }]);
        Ok(())
    }
}
