//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding `file_path` exists, creating it if needed.
/// Warns when the file itself is missing, since the store then starts empty.
pub async fn ensure_env(file_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    match tokio::fs::metadata(file_path).await {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow::anyhow!("{} is a directory, expected a file", file_path.display()));
        }
        Ok(_) => info!(path = %file_path.display(), "backing file found"),
        Err(_) => warn!(path = %file_path.display(), "backing file not found; starting with no messages"),
    }
    Ok(())
}
