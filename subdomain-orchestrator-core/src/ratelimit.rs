//! Per-session sliding-window rate limiting.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::error::{CoreError, CoreResult};

/// Rate-limited operation kinds, each with its own window counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Creation,
    Deletion,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Deletion => "deletion",
        }
    }
}

const DEFAULT_CREATION_LIMIT: usize = 5;
const DEFAULT_DELETION_LIMIT: usize = 3;
const DEFAULT_WINDOW_SECS: i64 = 3600;

/// In-memory sliding-window limiter keyed by `(session, operation)`.
///
/// Each key holds the timestamps of its counted events; events older than the
/// window are pruned on every check. Checking and recording are separate so a
/// caller can refuse up front but only count runs that actually start.
pub struct RateLimiter {
    creation_limit: usize,
    deletion_limit: usize,
    window: Duration,
    events: Mutex<HashMap<(String, Operation), Vec<DateTime<Utc>>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            DEFAULT_CREATION_LIMIT,
            DEFAULT_DELETION_LIMIT,
            DEFAULT_WINDOW_SECS,
        )
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(creation_limit: usize, deletion_limit: usize, window_secs: i64) -> Self {
        Self {
            creation_limit,
            deletion_limit,
            window: Duration::seconds(window_secs),
            events: Mutex::new(HashMap::new()),
        }
    }

    fn limit(&self, operation: Operation) -> usize {
        match operation {
            Operation::Creation => self.creation_limit,
            Operation::Deletion => self.deletion_limit,
        }
    }

    /// Refuse if the session's window is full. Does not count an event.
    pub fn check(&self, session_id: &str, operation: Operation) -> CoreResult<()> {
        self.check_at(session_id, operation, Utc::now())
    }

    /// Count an event for the session's window.
    pub fn record(&self, session_id: &str, operation: Operation) {
        self.record_at(session_id, operation, Utc::now());
    }

    /// [`check`](Self::check) against an explicit clock.
    pub fn check_at(
        &self,
        session_id: &str,
        operation: Operation,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (session_id.to_string(), operation);
        let cutoff = now - self.window;

        if let Some(timestamps) = events.get_mut(&key) {
            timestamps.retain(|t| *t > cutoff);
            if timestamps.len() >= self.limit(operation) {
                // The window frees up when its oldest surviving event expires.
                let retry_after_secs = timestamps
                    .iter()
                    .min()
                    .map(|oldest| (*oldest + self.window - now).num_seconds().max(0))
                    .unwrap_or(0);
                #[allow(clippy::cast_sign_loss)]
                return Err(CoreError::RateLimitExceeded {
                    operation: operation.as_str().to_string(),
                    retry_after_secs: retry_after_secs as u64,
                });
            }
        }
        Ok(())
    }

    /// [`record`](Self::record) against an explicit clock.
    pub fn record_at(&self, session_id: &str, operation: Operation, now: DateTime<Utc>) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        events
            .entry((session_id.to_string(), operation))
            .or_default()
            .push(now);
    }

    /// Remaining events the session may start right now.
    #[must_use]
    pub fn remaining(&self, session_id: &str, operation: Operation) -> usize {
        self.remaining_at(session_id, operation, Utc::now())
    }

    #[must_use]
    pub fn remaining_at(
        &self,
        session_id: &str,
        operation: Operation,
        now: DateTime<Utc>,
    ) -> usize {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (session_id.to_string(), operation);
        let cutoff = now - self.window;
        let used = events.get_mut(&key).map_or(0, |timestamps| {
            timestamps.retain(|t| *t > cutoff);
            timestamps.len()
        });
        self.limit(operation).saturating_sub(used)
    }
}
