use std::sync::Arc;

use axum::{routing::get, Json, Router};
use configs::NotFoundMode;
use service::messages::MessageRepository;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod messages;

/// Shared handler state: the message repository and the not-found policy.
#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageRepository>,
    pub not_found: NotFoundMode,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: message routes, health and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let message_root = get(messages::get_all_messages)
        .post(messages::send_message)
        .delete(messages::delete_all_messages);
    let message_item = get(messages::get_message)
        .put(messages::update_message)
        .delete(messages::delete_message);

    let api = Router::new()
        .route("/messages/", message_root.clone())
        .route("/messages", message_root)
        .route("/messages/:message_id", message_item)
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
