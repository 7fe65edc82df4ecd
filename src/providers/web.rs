//! Web search provider powered by daedra (DuckDuckGo backend).

use crate::providers::SourceProvider;
use crate::types::{AppError, ResearchQuery, Result, SourceKind, SourceResult, WebResult};
use async_trait::async_trait;

/// General web search provider.
pub struct WebProvider {
    max_results: usize,
}

impl WebProvider {
    /// Create a provider returning at most `max_results` hits per query.
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    /// Search the web by free text, provider-ranked.
    pub async fn search(&self, query: &str) -> Result<Vec<WebResult>> {
        let search_args = daedra::SearchArgs {
            query: query.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: self.max_results,
                ..Default::default()
            }),
        };

        match daedra::tools::search::perform_search(&search_args).await {
            Ok(response) => Ok(response
                .data
                .iter()
                .map(|r| WebResult {
                    title: r.title.clone(),
                    snippet: r.description.clone(),
                    link: r.url.clone(),
                })
                .collect()),
            Err(e) => Err(AppError::Search(format!("web search failed: {}", e))),
        }
    }
}

#[async_trait]
impl SourceProvider for WebProvider {
    fn kind(&self) -> SourceKind {
        SourceKind::Web
    }

    async fn fetch(&self, query: &ResearchQuery) -> Result<SourceResult> {
        let results = self.search(&query.text).await?;
        Ok(SourceResult::Web(results))
    }
}
