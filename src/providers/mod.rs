//! Source providers: uniform adapters over external information sources.
//!
//! Each provider wraps one collaborator (answer engine, paper index,
//! web search) behind the same `fetch` contract and isolates its own
//! failures: an error inside one provider is captured as a
//! [`SourceFailure`](crate::types::SourceFailure) and never poisons a
//! sibling source. The orchestrator depends on this isolation to keep
//! the all-sources-complete guarantee.

use crate::types::{ResearchQuery, Result, SourceKind, SourceResult};
use async_trait::async_trait;

/// Answer engine provider (passage retrieval + LLM synthesis).
pub mod answer;
/// Academic paper search provider (arXiv Atom API).
pub mod papers;
/// Web search provider.
pub mod web;

pub use answer::AnswerProvider;
pub use papers::ArxivProvider;
pub use web::WebProvider;

/// One external information source behind a uniform fetch contract.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Which source this provider adapts.
    fn kind(&self) -> SourceKind;

    /// Fetch results for a research query.
    ///
    /// Implementations map their own upstream errors into `Err`; the
    /// orchestrator converts any `Err` into a `SourceFailure` for this
    /// source alone.
    async fn fetch(&self, query: &ResearchQuery) -> Result<SourceResult>;
}
