// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording [`Notifier`] for asserting outbound notices in tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use soma_core::{Notifier, UserId};

/// Captures every notification instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications sent so far, in order.
    pub async fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().await.clone()
    }

    /// Notifications addressed to one user.
    pub async fn sent_to(&self, user_id: UserId) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user_id: UserId, text: &str) {
        self.sent.lock().await.push((user_id, text.to_string()));
    }
}
