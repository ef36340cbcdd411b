// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user sliding-window request throttling.
//!
//! A single-bucket limiter: it guarantees minimum spacing between two
//! consecutive admitted actions per user, nothing more. State is
//! process-local and intentionally lost on restart.

use std::sync::Arc;

use dashmap::DashMap;
use soma_config::model::ThrottleConfig;
use soma_core::UserId;
use tracing::warn;

use crate::clock::{Clock, MonotonicClock};

/// The throttle guard's verdict for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Proceed; the caller's timestamp was recorded.
    Admit,
    /// Too soon after the previous admitted action. A user-visible,
    /// non-fatal condition; the stored timestamp is left untouched.
    Reject,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admit)
    }
}

/// Per-user minimum-spacing limiter with incremental garbage collection.
///
/// The timestamp table is shared across all event-processing tasks within
/// one process; DashMap keeps per-user admission checks race-free.
pub struct ThrottleGuard {
    entries: DashMap<UserId, u64>,
    min_interval_ms: u64,
    retention_ms: u64,
    clock: Arc<dyn Clock>,
}

impl ThrottleGuard {
    /// Build a guard from configuration, using the monotonic wall clock.
    pub fn new(config: &ThrottleConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::default()))
    }

    /// Build a guard with an explicit clock (tests use [`ManualClock`]).
    ///
    /// [`ManualClock`]: crate::clock::ManualClock
    pub fn with_clock(config: &ThrottleConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            min_interval_ms: config.min_interval_ms,
            retention_ms: config.retention_secs.saturating_mul(1000),
            clock,
        }
    }

    /// Decide whether an action from `user_id` may proceed.
    ///
    /// Entries older than the retention window are pruned on every call,
    /// regardless of outcome, so cleanup stays incremental and needs no
    /// background task.
    pub fn admit(&self, user_id: UserId) -> Admission {
        let now = self.clock.now_millis();

        self.entries
            .retain(|_, last| now.saturating_sub(*last) < self.retention_ms);

        let admitted = match self.entries.entry(user_id) {
            dashmap::mapref::entry::Entry::Occupied(mut entry) => {
                if now.saturating_sub(*entry.get()) >= self.min_interval_ms {
                    entry.insert(now);
                    true
                } else {
                    false
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        };

        if admitted {
            Admission::Admit
        } else {
            warn!(user_id, "rate limit exceeded");
            Admission::Reject
        }
    }

    /// Whether a user currently has a tracked timestamp.
    pub fn is_tracked(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }

    /// Number of tracked users.
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }
}
