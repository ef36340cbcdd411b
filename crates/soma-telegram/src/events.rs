// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converts Telegram updates into normalized [`Event`]s.
//!
//! Only private-chat commands and inline-keyboard callbacks produce
//! events; everything else (group chatter, stickers, free text) is
//! ignored at the transport boundary.

use soma_core::{Event, EventKind};
use teloxide::prelude::*;
use teloxide::types::ChatKind;

/// Parse a command name out of a message text.
///
/// Accepts `/name` and the group-addressed `/name@botname` form; the name
/// is lowercased and arguments after the first whitespace are dropped
/// (they stay available through [`Event::text`]).
pub fn parse_command(text: &str) -> Option<String> {
    let rest = text.strip_prefix('/')?;
    let first = rest.split_whitespace().next()?;
    let name = first.split('@').next().unwrap_or(first);
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

/// Build an event from a private-chat command message.
///
/// Returns `None` for group messages, messages without a sender, and
/// texts that are not commands.
pub fn from_message(msg: &Message) -> Option<Event> {
    if !matches!(msg.chat.kind, ChatKind::Private(_)) {
        return None;
    }
    let user = msg.from.as_ref()?;
    let user_id = i64::try_from(user.id.0).ok()?;
    let text = msg.text()?;
    let action = parse_command(text)?;

    Some(Event {
        user_id,
        kind: EventKind::Command,
        action,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        text: Some(text.to_string()),
        chat_id: msg.chat.id.0,
        callback_id: None,
    })
}

/// Build an event from an inline-keyboard callback query.
///
/// The callback data is the action identifier. Queries without data are
/// ignored. The chat id is the user id; the bot only serves private
/// chats.
pub fn from_callback(query: &CallbackQuery) -> Option<Event> {
    let user_id = i64::try_from(query.from.id.0).ok()?;
    let action = query.data.as_ref()?.clone();

    Some(Event {
        user_id,
        kind: EventKind::Callback,
        action,
        username: query.from.username.clone(),
        first_name: Some(query.from.first_name.clone()),
        last_name: query.from.last_name.clone(),
        text: None,
        chat_id: user_id,
        callback_id: Some(query.id.0.clone()),
    })
}
