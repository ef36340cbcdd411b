// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget [`Notifier`] backed by the Telegram Bot API.

use async_trait::async_trait;
use soma_core::{Notifier, UserId};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::warn;

/// Sends plain-text notices directly to a user's private chat.
///
/// Delivery failures are logged and swallowed; callers treat `notify` as
/// infallible.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, user_id: UserId, text: &str) {
        if let Err(e) = self.bot.send_message(ChatId(user_id), text).await {
            warn!(user_id, error = %e, "failed to deliver notification");
        }
    }
}
