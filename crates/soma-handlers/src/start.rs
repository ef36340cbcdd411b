// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-contact handler: registers the user and shows the main menu.

use soma_core::{Event, Reply, SomaError, UserProfile};
use tracing::info;

use crate::context::HandlerContext;
use crate::{menus, texts};

/// Handle a start command. Registration is idempotent, so repeated
/// `/start` just re-shows the welcome screen.
pub async fn handle(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    let profile = UserProfile {
        username: event.username.clone(),
        first_name: event.first_name.clone(),
        last_name: event.last_name.clone(),
        phone: None,
    };

    // Best-effort: the welcome screen is shown even when the store is
    // down; the record is created on the next successful contact.
    match ctx.store.create_user(event.user_id, profile).await {
        Ok(_) => info!(user_id = event.user_id, "user registered"),
        Err(e) => {
            tracing::warn!(user_id = event.user_id, error = %e, "failed to register user")
        }
    }

    Ok(Reply::text(texts::welcome(event.first_name.as_deref())).with_menu(menus::main_menu()))
}
