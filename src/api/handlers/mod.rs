//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Document library listing.
pub mod documents;
/// Session export handlers (PDF, codelabs).
pub mod export;
/// Research orchestration handler.
pub mod research;
/// Standalone paper/web search handlers.
pub mod search;
/// Session retrieval handlers.
pub mod sessions;
