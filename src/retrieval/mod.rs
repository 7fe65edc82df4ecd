//! Narrow interface to the answer engine's passage index.
//!
//! Embedding, chunking, and vector search live behind this seam; the
//! research core only ever asks for the top passages for a query,
//! optionally scoped to one document.

use crate::types::{Passage, Result};
use async_trait::async_trait;

/// HTTP-backed retrieval client.
pub mod http;

pub use http::HttpRetriever;

/// Top-k passage retrieval over the document index.
#[async_trait]
pub trait PassageRetriever: Send + Sync {
    /// Retrieve the most relevant passages for `query`.
    ///
    /// When `document_ref` is given the search is filtered to that
    /// document; otherwise it runs unscoped across the index.
    async fn top_passages(
        &self,
        query: &str,
        document_ref: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<Passage>>;
}
