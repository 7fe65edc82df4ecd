//! Admission control middleware.

use crate::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

use crate::types::Result;

/// Reject requests that exceed the client's sliding-window budget.
///
/// Runs before any handler work; a rejected request touches no state
/// besides the limiter's own pruning.
pub async fn rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let client = client_identity(&req);
    state.limiter.admit(&client)?;
    Ok(next.run(req).await)
}

/// Best-effort client identity: peer address, else forwarded header.
fn client_identity(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
