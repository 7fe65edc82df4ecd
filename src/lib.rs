//! # Lectern - Document Research Server
//!
//! A document research server built in Rust: one question about a
//! document fans out concurrently to an answer engine (passage
//! retrieval + LLM synthesis), an academic paper index, and a web
//! search backend; the outcomes merge into one deterministic combined
//! report and the exchange is recorded in a bounded per-document
//! session.
//!
//! ## Overview
//!
//! Lectern can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `lectern-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use lectern::providers::{ArxivProvider, SourceProvider, WebProvider};
//! use lectern::research::ResearchOrchestrator;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let providers: Vec<Arc<dyn SourceProvider>> = vec![
//!     Arc::new(ArxivProvider::new(
//!         "https://export.arxiv.org/api/query".into(),
//!         5,
//!     )?),
//!     Arc::new(WebProvider::new(5)),
//! ];
//! let orchestrator = ResearchOrchestrator::new(providers, Duration::from_secs(30));
//! ```
//!
//! ## Architecture
//!
//! Inbound requests pass the rate limiter, then query validation, then
//! document lookup; the orchestrator fans out to the enabled source
//! providers, joins them all, and merges deterministically. A source
//! failing or timing out is captured per-source and never poisons its
//! siblings. Completed turns append to the document's session (at most
//! six), and snapshots persist out-of-band keyed by session id.
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`research`] - Fan-out/join orchestration and deterministic merge
//! - [`providers`] - Source adapters (answer engine, arXiv, web)
//! - [`session`] - Bounded session lifecycle and persistence
//! - [`limiter`] - Sliding-window admission control
//! - [`types`] - Common types and error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// TOML configuration.
pub mod config;
/// Session export (PDF, codelabs).
pub mod export;
/// Sliding-window rate limiting.
pub mod limiter;
/// LLM client abstraction for answer synthesis.
pub mod llm;
/// Source providers (answer engine, arXiv, web search).
pub mod providers;
/// Research orchestration: fan-out/join and deterministic merge.
pub mod research;
/// Passage retrieval seam to the answer engine's index.
pub mod retrieval;
/// Session lifecycle and persistence.
pub mod session;
/// Document library lookup.
pub mod storage;
/// Core types (requests, responses, errors).
pub mod types;
/// Query validation.
pub mod validate;

// Re-export commonly used types
pub use config::LecternConfig;
pub use limiter::RateLimiter;
pub use providers::SourceProvider;
pub use research::{ResearchOrchestrator, ResearchOutcome};
pub use session::{FileSessionStore, SessionManager, SessionStore};
pub use storage::{DocumentStore, LocalDocumentStore};
pub use types::{AppError, Result};

use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<LecternConfig>,
    /// Request admission control.
    pub limiter: Arc<RateLimiter>,
    /// Session registry and turn bounds.
    pub sessions: Arc<SessionManager>,
    /// Document library.
    pub documents: Arc<dyn DocumentStore>,
    /// Research fan-out/join engine.
    pub orchestrator: Arc<ResearchOrchestrator>,
    /// Paper provider for the standalone search endpoint.
    pub paper_provider: Arc<dyn SourceProvider>,
    /// Web provider for the standalone search endpoint.
    pub web_provider: Arc<dyn SourceProvider>,
}
