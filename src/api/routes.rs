use crate::AppState;
use crate::api::{handlers, middleware::rate_limit};
use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router.
///
/// Every route except `/health` sits behind the rate limiter.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/documents", get(handlers::documents::list_documents))
        .route("/search/papers", get(handlers::search::search_papers))
        .route("/search/web", get(handlers::search::search_web))
        .route("/research", post(handlers::research::conduct_research))
        .route(
            "/research/session/{document_ref}",
            get(handlers::sessions::get_session),
        )
        .route(
            "/research/export/{session_id}/pdf",
            post(handlers::export::export_session_pdf),
        )
        .route(
            "/research/export/{session_id}/codelabs",
            post(handlers::export::export_session_codelabs),
        )
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
