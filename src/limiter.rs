//! Sliding-window admission control per client identity.
//!
//! Each client owns an ordered window of request timestamps. On every
//! admission check, timestamps older than the window are pruned; if the
//! remaining count has reached the budget the request is rejected and
//! nothing is recorded. The registry is a read-write-locked map of
//! per-client mutexes, so concurrent checks for different clients never
//! contend on one lock.

use crate::types::{AppError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default request budget per window.
pub const DEFAULT_MAX_REQUESTS: usize = 100;
/// Default window length in seconds.
pub const DEFAULT_WINDOW_SECONDS: u64 = 3600;

/// Sliding-window rate limiter keyed by client identity.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    windows: RwLock<HashMap<String, Arc<Mutex<VecDeque<Instant>>>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_REQUESTS,
            Duration::from_secs(DEFAULT_WINDOW_SECONDS),
        )
    }
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window` per client.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        tracing::info!(
            max_requests,
            window_seconds = window.as_secs(),
            "rate limiter initialized"
        );
        Self {
            max_requests,
            window,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Check whether a request from `client_id` is admitted now.
    ///
    /// On rejection no timestamp is recorded; the client's window is
    /// left exactly as found (minus pruned stale entries).
    pub fn admit(&self, client_id: &str) -> Result<()> {
        self.admit_at(client_id, Instant::now())
    }

    /// Admission check against an explicit clock reading.
    pub fn admit_at(&self, client_id: &str, now: Instant) -> Result<()> {
        let entry = self.entry(client_id);
        let mut window = entry.lock();

        while let Some(oldest) = window.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() >= self.max_requests {
            tracing::warn!(client_id, "rate limit exceeded");
            return Err(AppError::RateLimited);
        }

        window.push_back(now);
        tracing::debug!(client_id, count = window.len(), "request admitted");
        Ok(())
    }

    /// Drop clients whose windows hold no live timestamps.
    ///
    /// Advisory memory bound; correctness does not depend on it because
    /// `admit` prunes on every check.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&self, now: Instant) {
        let mut windows = self.windows.write();
        let before = windows.len();
        windows.retain(|_, entry| {
            let mut window = entry.lock();
            while let Some(oldest) = window.front() {
                if now.saturating_duration_since(*oldest) >= self.window {
                    window.pop_front();
                } else {
                    break;
                }
            }
            !window.is_empty()
        });
        let dropped = before - windows.len();
        if dropped > 0 {
            tracing::info!(dropped, "swept idle rate-limit windows");
        }
    }

    /// Spawn a background task sweeping idle windows on an interval.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                limiter.sweep();
            }
        })
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.read().len()
    }

    fn entry(&self, client_id: &str) -> Arc<Mutex<VecDeque<Instant>>> {
        if let Some(entry) = self.windows.read().get(client_id) {
            return Arc::clone(entry);
        }
        let mut windows = self.windows.write();
        Arc::clone(
            windows
                .entry(client_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(VecDeque::new()))),
        )
    }
}
