//! Core types (requests, responses, research data model, errors).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============= Research Data Model =============

/// The three information sources a research run can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Document-scoped answer engine (passage retrieval + synthesis).
    Answer,
    /// Academic paper search (arXiv).
    Papers,
    /// General web search.
    Web,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Answer => "answer",
            Self::Papers => "papers",
            Self::Web => "web",
        };
        write!(f, "{}", name)
    }
}

/// Which sources a single research request wants consulted.
///
/// A disabled source contributes an empty section to the combined
/// report; it is not treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledSources {
    /// Consult the answer engine.
    pub answer: bool,
    /// Consult the paper index.
    pub papers: bool,
    /// Consult web search.
    pub web: bool,
}

impl Default for EnabledSources {
    fn default() -> Self {
        Self {
            answer: true,
            papers: true,
            web: true,
        }
    }
}

impl EnabledSources {
    /// Whether the given source is enabled.
    pub fn contains(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Answer => self.answer,
            SourceKind::Papers => self.papers,
            SourceKind::Web => self.web,
        }
    }
}

/// A validated research request, immutable once constructed.
#[derive(Debug, Clone)]
pub struct ResearchQuery {
    /// The document the question is about. Empty means unscoped.
    pub document_ref: String,
    /// The question text. Must have passed [`crate::validate`] rules.
    pub text: String,
    /// Sources to consult for this request.
    pub enabled: EnabledSources,
}

/// A retrieved passage supporting an answer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Passage {
    /// Excerpt text.
    pub text: String,
    /// Document the excerpt came from.
    pub document_ref: String,
    /// Retrieval relevance score (higher is better).
    pub score: f32,
}

/// Synthesized answer from the answer engine.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerResult {
    /// Synthesized answer text.
    pub text: String,
    /// Passages the synthesis was grounded on.
    pub supporting_excerpts: Vec<Passage>,
}

/// A single academic paper hit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaperResult {
    /// Paper title.
    pub title: String,
    /// Abstract text.
    pub summary: String,
    /// Publication date (YYYY-MM-DD).
    pub published: String,
    /// Author names in listing order.
    pub authors: Vec<String>,
    /// Link to the paper (PDF when available).
    pub link: String,
}

/// A single web search hit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebResult {
    /// Page title.
    pub title: String,
    /// Result snippet.
    pub snippet: String,
    /// Page URL.
    pub link: String,
}

/// A failure captured from one source.
///
/// Failures never cross the orchestration boundary as errors: one
/// source failing must not invalidate results from another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    /// Which source failed.
    pub kind: SourceKind,
    /// Human-readable reason.
    pub message: String,
}

/// Outcome of one source provider's fetch.
#[derive(Debug, Clone)]
pub enum SourceResult {
    /// Answer engine output.
    Answer(AnswerResult),
    /// Paper search output, provider-ranked.
    Papers(Vec<PaperResult>),
    /// Web search output, provider-ranked.
    Web(Vec<WebResult>),
    /// Captured failure for this source only.
    Failure(SourceFailure),
}

impl SourceResult {
    /// Which source produced this result.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Answer(_) => SourceKind::Answer,
            Self::Papers(_) => SourceKind::Papers,
            Self::Web(_) => SourceKind::Web,
            Self::Failure(f) => f.kind,
        }
    }
}

/// Deterministic merge of all enabled sources' outputs.
///
/// Section order is fixed (answer, papers, web) regardless of which
/// provider finished first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CombinedReport {
    /// Document analysis section.
    pub answer_section: String,
    /// Related research section.
    pub papers_section: String,
    /// Web resources section.
    pub web_section: String,
    /// Full rendered report text.
    pub rendered_text: String,
}

/// One completed research turn, immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResearchResult {
    /// Document the turn was about.
    pub document_ref: String,
    /// The question asked.
    pub query_text: String,
    /// Answer engine output, if enabled and successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerResult>,
    /// Paper hits, if enabled and successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub papers: Option<Vec<PaperResult>>,
    /// Web hits, if enabled and successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<Vec<WebResult>>,
    /// Rendered combined report.
    pub combined: String,
    /// When the turn completed.
    pub timestamp: DateTime<Utc>,
}

// ============= Sessions =============

/// Maximum number of turns a session may hold.
pub const MAX_SESSION_TURNS: usize = 6;

/// Bounded conversation history for one document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// Opaque unique identifier; the sole persistence key.
    pub session_id: String,
    /// Document this session belongs to.
    pub document_ref: String,
    /// Completed turns, append-only, at most [`MAX_SESSION_TURNS`].
    pub turns: Vec<ResearchResult>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last append time.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session for a document with a new opaque id.
    pub fn new(document_ref: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            document_ref: document_ref.into(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the session has reached its turn cap.
    pub fn is_full(&self) -> bool {
        self.turns.len() >= MAX_SESSION_TURNS
    }
}

// ============= API Request/Response Types =============

/// Available documents in the library.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentListResponse {
    /// Document refs that can be researched.
    pub available_documents: Vec<String>,
}

/// Request body for `POST /research`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResearchRequest {
    /// Document to research.
    pub document_ref: String,
    /// The question to answer.
    pub query: String,
    /// Consult the answer engine (default true).
    #[serde(default = "default_true")]
    pub use_answer: bool,
    /// Consult the paper index (default true).
    #[serde(default = "default_true")]
    pub use_papers: bool,
    /// Consult web search (default true).
    #[serde(default = "default_true")]
    pub use_web: bool,
}

fn default_true() -> bool {
    true
}

impl ResearchRequest {
    /// Sources selected by this request.
    pub fn enabled_sources(&self) -> EnabledSources {
        EnabledSources {
            answer: self.use_answer,
            papers: self.use_papers,
            web: self.use_web,
        }
    }
}

/// Response body for `POST /research`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResearchResponse {
    /// Session the result was appended to.
    pub session_id: String,
    /// The completed turn.
    pub result: ResearchResult,
}

/// Query string for the standalone search endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchParams {
    /// Free-text search query.
    pub query: String,
}

// ============= Error Types =============

/// Application error taxonomy.
///
/// Every variant maps to a distinct HTTP surface so callers can tell
/// rate limiting, validation, and session exhaustion apart.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Query text failed syntactic validation.
    #[error("Invalid query: {0}")]
    Validation(String),

    /// Client exceeded the sliding-window request budget.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Session already holds the maximum number of turns.
    #[error("Maximum questions ({MAX_SESSION_TURNS}) reached for this document")]
    SessionFull,

    /// Unknown document, session, or resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence or document-library I/O failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Upstream search provider failure.
    #[error("Search error: {0}")]
    Search(String),

    /// LLM provider failure.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Anything unexpected; surfaced to callers as a generic error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for the error class.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::RateLimited => "rate_limited",
            AppError::SessionFull => "session_full",
            AppError::NotFound(_) => "not_found",
            AppError::Storage(_) => "storage_error",
            AppError::Search(_) => "search_error",
            AppError::Llm(_) => "llm_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::SessionFull => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Search(_) | AppError::Llm(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal detail stays in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.code(), "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({
            "error": message,
            "code": self.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new("doc-A");
        assert_eq!(session.document_ref, "doc-A");
        assert!(session.turns.is_empty());
        assert!(!session.is_full());
        assert!(!session.session_id.is_empty());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new("doc-A");
        let b = Session::new("doc-A");
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_enabled_sources_default_all_on() {
        let enabled = EnabledSources::default();
        assert!(enabled.contains(SourceKind::Answer));
        assert!(enabled.contains(SourceKind::Papers));
        assert!(enabled.contains(SourceKind::Web));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            AppError::Validation("x".into()).code(),
            AppError::RateLimited.code(),
            AppError::SessionFull.code(),
            AppError::NotFound("x".into()).code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_research_request_defaults() {
        let req: ResearchRequest =
            serde_json::from_str(r#"{"document_ref": "doc-A", "query": "What is this about?"}"#)
                .unwrap();
        assert!(req.use_answer);
        assert!(req.use_papers);
        assert!(req.use_web);
    }
}
