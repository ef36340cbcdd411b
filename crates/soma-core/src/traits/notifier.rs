// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notification trait.

use async_trait::async_trait;

use crate::types::UserId;

/// Fire-and-forget message delivery to a single user.
///
/// Implementations log delivery failures and never propagate them; the
/// pipeline and handlers rely on `notify` being infallible from the
/// caller's point of view.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: UserId, text: &str);
}
