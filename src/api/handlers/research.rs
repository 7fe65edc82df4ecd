use crate::{
    AppState,
    types::{
        AppError, ResearchQuery, ResearchRequest, ResearchResponse, ResearchResult, Result,
    },
    validate::validate_query,
};
use axum::{Json, extract::State};
use chrono::Utc;
use std::sync::Arc;

/// Conduct research on a document.
///
/// The request passes validation and document lookup before any
/// provider is invoked; the completed turn is appended to the
/// document's session and the snapshot write is scheduled out-of-band.
#[utoipa::path(
    post,
    path = "/research",
    request_body = ResearchRequest,
    responses(
        (status = 200, description = "Research completed", body = ResearchResponse),
        (status = 400, description = "Session already holds the maximum number of turns"),
        (status = 404, description = "Unknown document"),
        (status = 422, description = "Query failed validation"),
        (status = 429, description = "Rate limited"),
        (status = 500, description = "Orchestration failure")
    ),
    tag = "research"
)]
pub async fn conduct_research(
    State(state): State<AppState>,
    Json(payload): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>> {
    tracing::info!(document_ref = %payload.document_ref, "received research request");

    validate_query(&payload.query)?;

    if !state.documents.contains(&payload.document_ref).await? {
        return Err(AppError::NotFound(format!(
            "document {}",
            payload.document_ref
        )));
    }

    // Reject before fanning out; a full session cannot take the turn
    // this run would produce. Concurrent fills are still caught by the
    // append below.
    if state.sessions.get_or_create(&payload.document_ref).is_full() {
        return Err(AppError::SessionFull);
    }

    let query = ResearchQuery {
        document_ref: payload.document_ref.clone(),
        text: payload.query.clone(),
        enabled: payload.enabled_sources(),
    };

    let outcome = state.orchestrator.run(&query).await?;

    let result = ResearchResult {
        document_ref: payload.document_ref.clone(),
        query_text: payload.query,
        answer: outcome.answer,
        papers: outcome.papers,
        web: outcome.web,
        combined: outcome.report.rendered_text,
        timestamp: Utc::now(),
    };

    let session_id = state.sessions.append(&payload.document_ref, result.clone())?;

    // Durable write happens out-of-band; the in-memory session stays
    // authoritative if it fails.
    let sessions = Arc::clone(&state.sessions);
    let persist_id = session_id.clone();
    tokio::spawn(async move {
        if let Err(e) = sessions.persist(&persist_id).await {
            tracing::warn!(session_id = %persist_id, error = %e, "session persist failed");
        }
    });

    Ok(Json(ResearchResponse { session_id, result }))
}
