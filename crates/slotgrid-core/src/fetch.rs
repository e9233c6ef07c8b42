//! Fetch lifecycle primitives: stale-response cancellation and a cache port.
//!
//! The engine itself never performs I/O. What it owns is the policy around
//! in-flight slot/availability fetches: when the triggering UI state
//! (selected staff, date, open dialog) changes before a fetch resolves, the
//! fetch is cancelled and its result must be discarded unconditionally --
//! even if it arrives before a newer fetch's result. The effective ordering
//! is "last resolved among non-cancelled wins"; a cancelled fetch's data
//! never applies. No timeout or retry is modeled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cancellation flag handed to one in-flight fetch. Cheap to clone; all
/// clones observe the same cancellation.
#[derive(Debug, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Tracks the single outstanding fetch for one piece of UI state.
///
/// `begin` cancels whatever was outstanding and issues a fresh token;
/// `accept` applies a resolved result only if its token is still live.
#[derive(Debug, Default)]
pub struct FetchGate {
    outstanding: Option<CancelToken>,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, cancelling the previous outstanding one.
    pub fn begin(&mut self) -> CancelToken {
        self.cancel_outstanding();
        let token = CancelToken::new();
        self.outstanding = Some(token.clone());
        token
    }

    /// Cancel the outstanding fetch, if any, without starting a new one
    /// (e.g., the dialog closed).
    pub fn cancel_outstanding(&mut self) {
        if let Some(token) = self.outstanding.take() {
            token.cancel();
        }
    }

    /// Gate a resolved fetch result. `None` means the fetch was cancelled
    /// and its payload must be dropped.
    pub fn accept<T>(&self, token: &CancelToken, value: T) -> Option<T> {
        if token.is_cancelled() {
            None
        } else {
            Some(value)
        }
    }
}

/// A cached fetch payload and when it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

/// Injected cache seam (the upstream system used browser storage with a
/// TTL). TTL comparison stays with the caller via [`is_fresh`], keeping the
/// engine's pure functions free of I/O and clocks.
pub trait CachePort {
    fn get(&self, key: &str) -> Option<CacheEntry>;
    fn set(&mut self, key: &str, entry: CacheEntry);
}

/// Whether a cache entry is still within its TTL at `now`.
pub fn is_fresh(entry: &CacheEntry, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - entry.fetched_at <= ttl
}
