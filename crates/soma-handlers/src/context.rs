// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared dependencies injected into every handler.

use std::sync::Arc;

use soma_config::SomaConfig;
use soma_core::{Notifier, UserId, UserStore};

/// Handle bundle passed to handlers: the user store, the outbound
/// notifier, and the resolved configuration.
///
/// Owned by the process bootstrap and shared behind `Arc`s; handlers never
/// construct store or notifier instances themselves.
#[derive(Clone)]
pub struct HandlerContext {
    pub store: Arc<dyn UserStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: SomaConfig,
}

impl HandlerContext {
    pub fn new(
        store: Arc<dyn UserStore>,
        notifier: Arc<dyn Notifier>,
        config: SomaConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// The configured operator, if any.
    pub fn admin_id(&self) -> Option<UserId> {
        self.config.telegram.admin_id
    }

    /// Whether this user is the configured operator.
    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_id() == Some(user_id)
    }

    /// Best-effort notification to the operator. A missing admin id is
    /// logged and skipped.
    pub async fn notify_admin(&self, text: &str) {
        match self.admin_id() {
            Some(admin_id) => self.notifier.notify(admin_id, text).await,
            None => tracing::debug!("no admin_id configured; dropping operator notification"),
        }
    }
}
