//! Answer engine provider.
//!
//! Retrieves the top passages for the query (scoped to the requested
//! document when one is given), then asks the LLM to synthesize an
//! answer grounded on those excerpts.

use crate::llm::LlmClient;
use crate::providers::SourceProvider;
use crate::retrieval::PassageRetriever;
use crate::types::{AnswerResult, ResearchQuery, Result, SourceKind, SourceResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Rendered when retrieval finds nothing for the document.
pub const NO_PASSAGES_ANSWER: &str = "No relevant information found in the document.";

/// Document-scoped answer provider.
pub struct AnswerProvider {
    retriever: Arc<dyn PassageRetriever>,
    llm: Arc<dyn LlmClient>,
    top_k: usize,
}

impl AnswerProvider {
    /// Create a provider over a retriever and a synthesis model.
    pub fn new(
        retriever: Arc<dyn PassageRetriever>,
        llm: Arc<dyn LlmClient>,
        top_k: usize,
    ) -> Self {
        Self {
            retriever,
            llm,
            top_k,
        }
    }

    /// Answer a question, optionally scoped to one document.
    pub async fn answer(&self, query: &str, document_ref: Option<&str>) -> Result<AnswerResult> {
        let passages = self
            .retriever
            .top_passages(query, document_ref, self.top_k)
            .await?;

        if passages.is_empty() {
            return Ok(AnswerResult {
                text: NO_PASSAGES_ANSWER.to_string(),
                supporting_excerpts: Vec::new(),
            });
        }

        let context = passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Analyze these document excerpts related to the query: {query}\n\n\
             Document excerpts:\n{context}\n\n\
             Provide a clear and comprehensive answer focusing on the query. \
             Include specific details and examples from the document where relevant."
        );

        let text = self.llm.generate(&prompt).await?;

        Ok(AnswerResult {
            text,
            supporting_excerpts: passages,
        })
    }
}

#[async_trait]
impl SourceProvider for AnswerProvider {
    fn kind(&self) -> SourceKind {
        SourceKind::Answer
    }

    async fn fetch(&self, query: &ResearchQuery) -> Result<SourceResult> {
        let scope = if query.document_ref.is_empty() {
            None
        } else {
            Some(query.document_ref.as_str())
        };
        let answer = self.answer(&query.text, scope).await?;
        Ok(SourceResult::Answer(answer))
    }
}
