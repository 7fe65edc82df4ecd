use crate::{
    AppState,
    types::{AppError, DocumentListResponse, Result},
};
use axum::{Json, extract::State};

/// List researchable documents in the library.
#[utoipa::path(
    get,
    path = "/documents",
    responses(
        (status = 200, description = "Available documents", body = DocumentListResponse),
        (status = 404, description = "Library is empty"),
        (status = 500, description = "Library unreachable")
    ),
    tag = "documents"
)]
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let available_documents = state.documents.list().await?;

    if available_documents.is_empty() {
        return Err(AppError::NotFound(
            "no documents in the library".to_string(),
        ));
    }

    Ok(Json(DocumentListResponse {
        available_documents,
    }))
}
