use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::{file::message_store::MessageStore, messages::MessageRepository, runtime};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {raw}: {e}")))
}

/// Open the backing file named in `cfg` and wrap it as handler state.
/// A malformed backing file fails here, before anything is served.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let path = cfg.storage.path.as_path();
    runtime::ensure_env(path).await?;
    let store = MessageStore::open(path).await?;
    info!(path = %store.path().display(), count = store.len().await, "message store ready");
    let messages: Arc<dyn MessageRepository> = store;
    Ok(AppState { messages, not_found: cfg.api.not_found })
}

/// Build state and router from `cfg`.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind {addr}: {e}"))?;
    info!(%addr, not_found = ?cfg.api.not_found, "message board listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(anyhow::Error::from)?;
    info!("message board stopped");
    Ok(())
}
