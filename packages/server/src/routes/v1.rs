use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    document_routes(config).merge(chat_routes())
}

fn document_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::document::upload_document,
            handlers::document::list_documents
        ))
        .routes(routes!(
            handlers::document::get_document,
            handlers::document::replace_document,
            handlers::document::delete_document
        ))
        .routes(routes!(handlers::document::list_turns))
        .layer(handlers::document::upload_body_limit(config.upload.max_size_mb))
}

fn chat_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::chat::chat))
}
