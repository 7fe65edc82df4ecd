//! Syntactic validation of research queries.
//!
//! Validation runs before any provider is invoked; a rejected query
//! never reaches the orchestrator. Rules are checked in order and the
//! first failing rule names the rejection reason.

use crate::types::{AppError, Result};

/// Minimum trimmed query length.
pub const MIN_QUERY_LEN: usize = 10;
/// Maximum raw query length.
pub const MAX_QUERY_LEN: usize = 500;

/// Punctuation admitted in addition to letters, digits, and whitespace.
const ALLOWED_PUNCTUATION: &[char] = &['?', '.', ',', '-', '\'', '"'];

/// Validate a research query.
///
/// Rules, in order:
/// 1. trimmed length must be at least [`MIN_QUERY_LEN`];
/// 2. raw length must not exceed [`MAX_QUERY_LEN`];
/// 3. every character must be a letter, digit, whitespace, or one of
///    `? . , - ' "`.
pub fn validate_query(text: &str) -> Result<()> {
    let trimmed_len = text.trim().chars().count();
    if trimmed_len < MIN_QUERY_LEN {
        tracing::warn!(chars = trimmed_len, "query rejected: too short");
        return Err(AppError::Validation(format!(
            "query too short: {} characters (minimum {})",
            trimmed_len, MIN_QUERY_LEN
        )));
    }

    let raw_len = text.chars().count();
    if raw_len > MAX_QUERY_LEN {
        tracing::warn!(chars = raw_len, "query rejected: too long");
        return Err(AppError::Validation(format!(
            "query too long: {} characters (maximum {})",
            raw_len, MAX_QUERY_LEN
        )));
    }

    if let Some(bad) = text.chars().find(|c| !is_allowed_char(*c)) {
        tracing::warn!("query rejected: contains invalid characters");
        return Err(AppError::Validation(format!(
            "query contains invalid character: {:?}",
            bad
        )));
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}
