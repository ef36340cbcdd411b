// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User record store trait, the seam between the bot and its persistence
//! backend.

use async_trait::async_trait;

use crate::error::SomaError;
use crate::types::{CounterField, UserId, UserPatch, UserProfile, UserRecord};

/// Durable mapping from user id to [`UserRecord`].
///
/// All operations are best-effort: callers must treat `Ok(false)` and
/// `Ok(None)` as "state unknown, proceed conservatively". Errors are
/// reserved for backend faults (unreachable database, failed query).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a record. `Ok(None)` means no such user.
    async fn get_user(&self, id: UserId) -> Result<Option<UserRecord>, SomaError>;

    /// Create a record if absent. Idempotent: re-registering an existing
    /// id is a no-op that reports success.
    async fn create_user(&self, id: UserId, profile: UserProfile) -> Result<bool, SomaError>;

    /// Apply a partial update. Touches `last_activity`. Returns false if
    /// the user does not exist.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<bool, SomaError>;

    /// Increase a monotonic counter by exactly 1.
    async fn increment_counter(&self, id: UserId, field: CounterField) -> Result<bool, SomaError>;

    /// Append a problem label, de-duplicated and insertion-ordered.
    async fn add_problem(&self, id: UserId, label: &str) -> Result<bool, SomaError>;

    /// Activate a subscription for the given number of days from now.
    async fn set_subscription(&self, id: UserId, days: i64) -> Result<bool, SomaError>;

    /// All records. Used only by reporting, never on the access path.
    async fn list_users(&self) -> Result<Vec<UserRecord>, SomaError>;
}
