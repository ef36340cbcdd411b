// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Soma bot.
//!
//! Bridges teloxide long polling into a queue of normalized [`Event`]s,
//! renders [`Reply`] screens as HTML messages with inline keyboards, and
//! answers callback queries so the client-side spinner clears.
//!
//! [`Event`]: soma_core::Event
//! [`Reply`]: soma_core::Reply

pub mod events;
pub mod gateway;
pub mod notifier;

use soma_config::model::TelegramConfig;
use soma_core::{Event, Menu, Reply, SomaError};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub use gateway::TelegramGateway;
pub use notifier::TelegramNotifier;

/// Telegram transport: long polling in, message sends out.
///
/// `connect` spawns the polling task; inbound events are consumed through
/// [`receive`]. Screen texts are sent with HTML parse mode and fall back
/// to plain text when Telegram rejects the markup.
///
/// [`receive`]: TelegramChannel::receive
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<Event>>,
    inbound_tx: mpsc::Sender<Event>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Create the channel. Requires `config.bot_token`.
    pub fn new(config: &TelegramConfig) -> Result<Self, SomaError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            SomaError::Config("telegram.bot_token is required to start the bot".into())
        })?;
        if token.is_empty() {
            return Err(SomaError::Config("telegram.bot_token cannot be empty".into()));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// The underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// A [`TelegramNotifier`] sharing this channel's bot.
    pub fn notifier(&self) -> TelegramNotifier {
        TelegramNotifier::new(self.bot.clone())
    }

    /// Start long polling. Idempotent; a second call is a no-op.
    pub async fn connect(&mut self) -> Result<(), SomaError> {
        if self.polling_handle.is_some() {
            return Ok(());
        }

        let bot = self.bot.clone();
        let msg_tx = self.inbound_tx.clone();
        let cb_tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = dptree::entry()
                .branch(Update::filter_message().endpoint(move |msg: Message| {
                    let tx = msg_tx.clone();
                    async move {
                        match events::from_message(&msg) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    warn!("inbound queue closed, dropping message");
                                }
                            }
                            None => {
                                debug!(chat_id = msg.chat.id.0, "ignoring message without an action")
                            }
                        }
                        respond(())
                    }
                }))
                .branch(
                    Update::filter_callback_query().endpoint(move |query: CallbackQuery| {
                        let tx = cb_tx.clone();
                        async move {
                            match events::from_callback(&query) {
                                Some(event) => {
                                    if tx.send(event).await.is_err() {
                                        warn!("inbound queue closed, dropping callback");
                                    }
                                }
                                None => debug!("ignoring callback query without data"),
                            }
                            respond(())
                        }
                    }),
                );

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {}) // Silently ignore other update kinds
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    /// Next inbound event. Errors only when the polling bridge is gone.
    pub async fn receive(&self) -> Result<Event, SomaError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| SomaError::Channel {
            message: "Telegram inbound queue closed".into(),
            source: None,
        })
    }

    /// Stop the polling task. The inbound queue drains and then closes.
    pub fn shutdown(&self) {
        if let Some(handle) = &self.polling_handle {
            debug!("stopping Telegram long polling");
            handle.abort();
        }
    }

    /// Deliver a reply screen to a chat.
    ///
    /// Sent with HTML parse mode first; if Telegram rejects the entities,
    /// the same text is resent plain so the user never loses the screen.
    pub async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), SomaError> {
        let markup = reply.menu.as_ref().map(render_menu);

        let mut request = self
            .bot
            .send_message(ChatId(chat_id), &reply.text)
            .parse_mode(ParseMode::Html);
        if let Some(markup) = markup.clone() {
            request = request.reply_markup(markup);
        }

        match request.await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(chat_id, error = %e, "HTML send failed, retrying as plain text");
                let mut plain = self.bot.send_message(ChatId(chat_id), &reply.text);
                if let Some(markup) = markup {
                    plain = plain.reply_markup(markup);
                }
                plain.await.map(|_| ()).map_err(|e| SomaError::Channel {
                    message: format!("failed to send reply: {e}"),
                    source: Some(Box::new(e)),
                })
            }
        }
    }

    /// Answer a callback query, with an optional toast text.
    ///
    /// Best-effort: an unanswered query only leaves the client spinner
    /// running a little longer.
    pub async fn answer_callback(&self, callback_id: &str, toast: Option<&str>) {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_owned()));
        if let Some(text) = toast {
            request = request.text(text.to_owned());
        }
        if let Err(e) = request.await {
            debug!(error = %e, "failed to answer callback query");
        }
    }
}

/// Render a transport-neutral [`Menu`] as an inline keyboard.
fn render_menu(menu: &Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.clone()))
            .collect::<Vec<_>>()
    }))
}
