//! Session lifecycle: bounded per-document conversation history.
//!
//! A session is created lazily on the first query for a document,
//! holds at most [`MAX_SESSION_TURNS`](crate::types::MAX_SESSION_TURNS)
//! turns, and is the only entity with persistence semantics. Lookup
//! goes by document ref; persistence goes by the opaque session id.
//! The two key spaces never mix.

/// In-memory session registry and turn bounds enforcement.
pub mod manager;
/// Durable session snapshots.
pub mod store;

pub use manager::SessionManager;
pub use store::{FileSessionStore, SessionStore};
