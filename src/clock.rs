//! Wall-clock access and clock-skew tracking.

#[cfg(any(test, feature = "mocks"))]
use std::sync::atomic::{AtomicI64, Ordering};
#[cfg(any(test, feature = "mocks"))]
use std::sync::Arc;

use chrono::Utc;

/// How far a signed timestamp may drift from the server clock, in seconds.
pub const SERVER_TOLERANCE_SECS: i64 = 5;

/// Source of the local wall-clock time in unix seconds.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and advance the
/// clock seen by the client.
#[cfg(any(test, feature = "mocks"))]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

#[cfg(any(test, feature = "mocks"))]
impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "mocks"))]
impl Clock for ManualClock {
    fn now_unix(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Offset of the local clock relative to the server, in seconds.
///
/// Positive when the local clock runs ahead. Computed once from the
/// challenge response and then held fixed for the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSkew(i64);

impl ClockSkew {
    /// `local_now - server_issued_at`.
    pub fn compute(local_now: i64, server_issued_at: i64) -> Self {
        Self(local_now - server_issued_at)
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub fn secs(&self) -> i64 {
        self.0
    }

    /// Translates a local timestamp into server time.
    pub fn server_time(&self, local_now: i64) -> i64 {
        local_now - self.0
    }

    /// Whether the server would accept `signed_at` when its own clock reads `server_now`.
    pub fn within_tolerance(signed_at: i64, server_now: i64) -> bool {
        (server_now - signed_at).abs() <= SERVER_TOLERANCE_SECS
    }
}
