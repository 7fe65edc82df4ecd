//! Standalone search endpoints.
//!
//! These hit a single provider directly, unscoped to any document,
//! outside the session lifecycle.

use crate::{
    AppState,
    types::{
        AppError, EnabledSources, PaperResult, ResearchQuery, Result, SearchParams, SourceResult,
        WebResult,
    },
};
use axum::{
    Json,
    extract::{Query, State},
};

/// Search academic papers by free text.
#[utoipa::path(
    get,
    path = "/search/papers",
    params(("query" = String, Query, description = "Free-text search query")),
    responses(
        (status = 200, description = "Paper hits, provider-ranked", body = Vec<PaperResult>),
        (status = 500, description = "Upstream search failure")
    ),
    tag = "search"
)]
pub async fn search_papers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PaperResult>>> {
    match state.paper_provider.fetch(&unscoped(params.query)).await? {
        SourceResult::Papers(papers) => Ok(Json(papers)),
        SourceResult::Failure(f) => Err(AppError::Search(f.message)),
        other => Err(AppError::Internal(format!(
            "paper provider returned {} result",
            other.kind()
        ))),
    }
}

/// Search the web by free text.
#[utoipa::path(
    get,
    path = "/search/web",
    params(("query" = String, Query, description = "Free-text search query")),
    responses(
        (status = 200, description = "Web hits, provider-ranked", body = Vec<WebResult>),
        (status = 500, description = "Upstream search failure")
    ),
    tag = "search"
)]
pub async fn search_web(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<WebResult>>> {
    match state.web_provider.fetch(&unscoped(params.query)).await? {
        SourceResult::Web(results) => Ok(Json(results)),
        SourceResult::Failure(f) => Err(AppError::Search(f.message)),
        other => Err(AppError::Internal(format!(
            "web provider returned {} result",
            other.kind()
        ))),
    }
}

fn unscoped(text: String) -> ResearchQuery {
    ResearchQuery {
        document_ref: String::new(),
        text,
        enabled: EnabledSources::default(),
    }
}
