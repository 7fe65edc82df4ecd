use crate::{
    AppState,
    types::{AppError, Result, Session},
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Get (or lazily create) the research session for a document.
///
/// A session holding the maximum number of turns is complete; further
/// requests against it are rejected so the cap is visible to callers
/// before they submit another question.
#[utoipa::path(
    get,
    path = "/research/session/{document_ref}",
    params(("document_ref" = String, Path, description = "Document ref")),
    responses(
        (status = 200, description = "The document's session", body = Session),
        (status = 400, description = "Session is complete (maximum turns reached)")
    ),
    tag = "research"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(document_ref): Path<String>,
) -> Result<Json<Session>> {
    let session = state.sessions.get_or_create(&document_ref);

    if session.is_full() {
        return Err(AppError::SessionFull);
    }

    Ok(Json(session))
}
