//! HTTP API handlers and routes.
//!
//! The REST surface of Lectern, built on Axum.
//!
//! # Endpoints
//!
//! - `GET /documents` - List researchable documents
//! - `GET /search/papers?query=` - Standalone paper search
//! - `GET /search/web?query=` - Standalone web search
//! - `POST /research` - Conduct research on a document
//! - `GET /research/session/{document_ref}` - Get or create the document's session
//! - `POST /research/export/{session_id}/pdf` - Export a session as PDF
//! - `POST /research/export/{session_id}/codelabs` - Export a session as codelabs JSON
//! - `GET /health` - Liveness check (not rate limited)
//!
//! Every endpoint except `/health` passes the sliding-window rate
//! limiter first; rejections surface as 429 with a `rate_limited`
//! code, distinct from validation (422) and session-full (400)
//! rejections.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Request admission middleware.
pub mod middleware;
/// Router configuration and route definitions.
pub mod routes;
