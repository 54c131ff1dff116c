//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the backing file's directory exists before the store is opened.
pub async fn ensure_env(messages_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(messages_file).await
}
