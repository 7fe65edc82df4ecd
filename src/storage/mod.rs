//! Document library lookup.
//!
//! The research core only needs to enumerate documents and check that
//! a requested ref exists; ingestion and indexing live elsewhere. The
//! default implementation lists a local directory.

use crate::types::{AppError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Extensions recognized as researchable documents.
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "md", "txt"];

/// Read-only view of the document library.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All researchable document refs, sorted.
    async fn list(&self) -> Result<Vec<String>>;

    /// Whether the given ref names a known document.
    async fn contains(&self, document_ref: &str) -> Result<bool> {
        Ok(self.list().await?.iter().any(|d| d == document_ref))
    }
}

/// Library backed by a local directory of document files.
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    /// Create a store over the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn list(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            AppError::Storage(format!(
                "failed to read document library {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AppError::Storage(format!("failed to scan document library: {}", e))
        })? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_document = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if !is_document {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                documents.push(name.to_string());
            }
        }

        documents.sort();
        Ok(documents)
    }
}
