//! Session export handlers.
//!
//! Exports resolve sessions by their opaque id (memory first, then
//! store) - never by document ref; the two key spaces do not mix.

use crate::{
    AppState,
    export,
    types::{AppError, Result, Session},
};
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

async fn load_session(state: &AppState, session_id: &str) -> Result<Session> {
    state
        .sessions
        .load(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("session {}", session_id)))
}

/// Export a research session as a PDF report.
#[utoipa::path(
    post,
    path = "/research/export/{session_id}/pdf",
    params(("session_id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "PDF report", content_type = "application/pdf"),
        (status = 404, description = "Unknown session"),
        (status = 500, description = "Export failure")
    ),
    tag = "export"
)]
pub async fn export_session_pdf(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse> {
    let session = load_session(&state, &session_id).await?;
    let bytes = export::export_pdf(&session)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=research_{}.pdf", session_id),
        ),
    ];
    Ok((headers, bytes))
}

/// Export a research session in codelabs format.
#[utoipa::path(
    post,
    path = "/research/export/{session_id}/codelabs",
    params(("session_id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Codelabs document"),
        (status = 404, description = "Unknown session"),
        (status = 500, description = "Export failure")
    ),
    tag = "export"
)]
pub async fn export_session_codelabs(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let session = load_session(&state, &session_id).await?;
    Ok(Json(export::export_codelabs(&session)))
}
