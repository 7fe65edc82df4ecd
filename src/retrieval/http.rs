//! Retrieval over a remote vector-search service.

use crate::retrieval::PassageRetriever;
use crate::types::{AppError, Passage, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RetrievalRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_ref: Option<&'a str>,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct RetrievalResponse {
    passages: Vec<Passage>,
}

/// Client for a remote passage-retrieval endpoint.
///
/// The endpoint accepts `{query, document_ref?, top_k}` and answers
/// `{passages: [{text, document_ref, score}]}`, ranked by relevance.
pub struct HttpRetriever {
    client: reqwest::Client,
    url: String,
}

impl HttpRetriever {
    /// Create a retriever against the given search endpoint URL.
    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl PassageRetriever for HttpRetriever {
    async fn top_passages(
        &self,
        query: &str,
        document_ref: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<Passage>> {
        let body = RetrievalRequest {
            query,
            document_ref,
            top_k,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("retrieval request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Search(format!(
                "retrieval endpoint returned status {}",
                status
            )));
        }

        let parsed: RetrievalResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("invalid retrieval response: {}", e)))?;

        Ok(parsed.passages)
    }
}
