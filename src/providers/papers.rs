//! Academic paper search over the arXiv export API.
//!
//! Results come back as an Atom feed; the parser scans the feed text
//! directly rather than pulling in a full XML stack, which is all the
//! handful of fixed tags here require.

use crate::providers::SourceProvider;
use crate::types::{AppError, PaperResult, ResearchQuery, Result, SourceKind, SourceResult};
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = "lectern-server/0.3 (https://github.com/dirmacs/lectern)";

/// Paper search provider backed by arXiv.
pub struct ArxivProvider {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl ArxivProvider {
    /// Create a provider against the given arXiv query endpoint.
    pub fn new(base_url: String, max_results: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            max_results,
        })
    }

    /// Search for papers by free text, relevance-ranked.
    pub async fn search(&self, query: &str) -> Result<Vec<PaperResult>> {
        let url = format!(
            "{}?search_query={}&start=0&max_results={}&sortBy=relevance&sortOrder=descending",
            self.base_url,
            urlencoding::encode(&format!("all:{}", query)),
            self.max_results,
        );
        tracing::debug!(%url, "arXiv search");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("arXiv request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Search(format!(
                "arXiv returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Search(format!("failed to read arXiv response: {}", e)))?;

        Ok(parse_atom_feed(&body))
    }
}

#[async_trait]
impl SourceProvider for ArxivProvider {
    fn kind(&self) -> SourceKind {
        SourceKind::Papers
    }

    async fn fetch(&self, query: &ResearchQuery) -> Result<SourceResult> {
        let papers = self.search(&query.text).await?;
        Ok(SourceResult::Papers(papers))
    }
}

// ============= Atom Feed Parsing =============

/// Parse an arXiv Atom feed into paper results, in feed order.
pub fn parse_atom_feed(xml: &str) -> Vec<PaperResult> {
    extract_entries(xml)
        .iter()
        .filter_map(|entry| parse_entry(entry))
        .collect()
}

/// Extract all `<entry>...</entry>` blocks from the feed.
fn extract_entries(xml: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut search_from = 0;

    while let Some(pos) = xml[search_from..].find("<entry>") {
        let start = search_from + pos;
        let Some(end_pos) = xml[start..].find("</entry>") else {
            break;
        };
        let end = start + end_pos + "</entry>".len();
        entries.push(&xml[start..end]);
        search_from = end;
    }

    entries
}

fn parse_entry(entry: &str) -> Option<PaperResult> {
    let id_url = extract_tag_text(entry, "id")?;
    let title = normalize_whitespace(&extract_tag_text(entry, "title")?);
    let summary = normalize_whitespace(&extract_tag_text(entry, "summary").unwrap_or_default());
    let published = extract_tag_text(entry, "published")
        .map(|ts| date_only(&ts))
        .unwrap_or_default();

    let mut authors = Vec::new();
    let mut author_search = 0;
    while let Some(pos) = entry[author_search..].find("<author>") {
        let author_start = author_search + pos;
        let Some(end_pos) = entry[author_start..].find("</author>") else {
            break;
        };
        let author_end = author_start + end_pos + "</author>".len();
        if let Some(name) = extract_tag_text(&entry[author_start..author_end], "name") {
            authors.push(name);
        }
        author_search = author_end;
    }

    let link = extract_pdf_link(entry).unwrap_or(id_url);

    Some(PaperResult {
        title,
        summary,
        published,
        authors,
        link,
    })
}

/// Find the `<link title="pdf" .../>` href, if the entry carries one.
fn extract_pdf_link(entry: &str) -> Option<String> {
    let mut link_search = 0;
    while let Some(pos) = entry[link_search..].find("<link") {
        let link_start = link_search + pos;
        let Some(end_pos) = entry[link_start..].find('>') else {
            break;
        };
        let link_end = link_start + end_pos + 1;
        let link_tag = &entry[link_start..link_end];

        let title_attr = extract_attribute(link_tag, "title").unwrap_or_default();
        let link_type = extract_attribute(link_tag, "type").unwrap_or_default();
        if title_attr == "pdf" || link_type == "application/pdf" {
            return extract_attribute(link_tag, "href");
        }
        link_search = link_end;
    }
    None
}

/// Extract the text content of the first occurrence of `<tag>text</tag>`.
fn extract_tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let start_pos = xml.find(&open)?;
    // The opening tag may carry attributes.
    let content_start = xml[start_pos..].find('>')? + start_pos + 1;
    let content_end = xml[content_start..].find(&close)? + content_start;

    Some(xml[content_start..content_end].trim().to_string())
}

/// Extract an attribute value from a tag string.
fn extract_attribute(tag: &str, attr: &str) -> Option<String> {
    let search = format!("{}=\"", attr);
    let start = tag.find(&search)? + search.len();
    let end = tag[start..].find('"')? + start;
    Some(tag[start..end].to_string())
}

/// Collapse runs of whitespace into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce an Atom timestamp like `2017-06-12T17:57:34Z` to its date.
fn date_only(timestamp: &str) -> String {
    timestamp
        .split('T')
        .next()
        .unwrap_or(timestamp)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnabledSources;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query</title>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T01:09:28Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All You Need</title>
    <summary>  The dominant sequence transduction models are based on complex
recurrent or convolutional neural networks.  </summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link href="http://arxiv.org/pdf/1706.03762v7" title="pdf" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/1810.04805v2</id>
    <published>2018-10-11T00:00:00Z</published>
    <title>BERT: Pre-training of Deep Bidirectional Transformers</title>
    <summary>We introduce a new language representation model.</summary>
    <author><name>Jacob Devlin</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed_entries_in_order() {
        let papers = parse_atom_feed(SAMPLE_FEED);
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title, "Attention Is All You Need");
        assert_eq!(papers[1].title, "BERT: Pre-training of Deep Bidirectional Transformers");
    }

    #[test]
    fn test_parse_entry_fields() {
        let papers = parse_atom_feed(SAMPLE_FEED);
        let paper = &papers[0];
        assert_eq!(paper.published, "2017-06-12");
        assert_eq!(paper.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(paper.link, "http://arxiv.org/pdf/1706.03762v7");
        assert!(!paper.summary.contains('\n'));
    }

    #[test]
    fn test_missing_pdf_link_falls_back_to_id() {
        let papers = parse_atom_feed(SAMPLE_FEED);
        assert_eq!(papers[1].link, "http://arxiv.org/abs/1810.04805v2");
    }

    #[test]
    fn test_parse_empty_feed() {
        let papers = parse_atom_feed("<feed><title>ArXiv Query</title></feed>");
        assert!(papers.is_empty());
    }

    #[tokio::test]
    async fn test_search_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_FEED))
            .mount(&server)
            .await;

        let provider = ArxivProvider::new(format!("{}/api/query", server.uri()), 5).unwrap();
        let papers = provider.search("attention").await.unwrap();
        assert_eq!(papers.len(), 2);
    }

    #[tokio::test]
    async fn test_search_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = ArxivProvider::new(format!("{}/api/query", server.uri()), 5).unwrap();
        let err = provider.search("attention").await.unwrap_err();
        assert!(matches!(err, AppError::Search(_)));
    }

    #[tokio::test]
    async fn test_fetch_wraps_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_FEED))
            .mount(&server)
            .await;

        let provider = ArxivProvider::new(format!("{}/api/query", server.uri()), 5).unwrap();
        let query = ResearchQuery {
            document_ref: "doc-A".to_string(),
            text: "attention mechanisms".to_string(),
            enabled: EnabledSources::default(),
        };
        match provider.fetch(&query).await.unwrap() {
            SourceResult::Papers(papers) => assert_eq!(papers.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
