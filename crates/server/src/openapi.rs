use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub id: i64, pub text: String, pub user: String }

#[derive(ToSchema)]
pub struct MessageEnvelopeDoc { pub message: MessageDoc }

#[derive(ToSchema)]
pub struct MessageListDoc { pub messages: Vec<MessageDoc> }

#[derive(ToSchema)]
pub struct StatusMessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::messages::send_message,
        crate::routes::messages::get_message,
        crate::routes::messages::get_all_messages,
        crate::routes::messages::update_message,
        crate::routes::messages::delete_message,
        crate::routes::messages::delete_all_messages,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            MessageEnvelopeDoc,
            MessageListDoc,
            StatusMessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "Post"),
        (name = "Get"),
        (name = "Put"),
        (name = "Delete")
    )
)]
pub struct ApiDoc;
