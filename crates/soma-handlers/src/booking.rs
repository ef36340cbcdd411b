// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consultation booking.

use soma_core::{CounterField, Event, Reply, SomaError};
use tracing::{info, warn};

use crate::context::HandlerContext;
use crate::{menus, texts};

pub async fn handle(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    match event.action.as_str() {
        "booking" => Ok(Reply::text(texts::BOOKING).with_menu(menus::booking_menu())),
        "booking_form" => request(ctx, event).await,
        _ => Ok(crate::menu::unknown()),
    }
}

async fn request(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    if let Err(e) = ctx
        .store
        .increment_counter(event.user_id, CounterField::ConsultationRequests)
        .await
    {
        warn!(user_id = event.user_id, error = %e, "failed to count consultation request");
    }

    ctx.notify_admin(&format!(
        "📅 Consultation request\n\nFrom: {}\n\nReach out to agree on a time.",
        event.actor(),
    ))
    .await;
    info!(user_id = event.user_id, "consultation requested");

    Ok(Reply::text(texts::BOOKING_CONFIRMED)
        .with_menu(menus::back_to_menu())
        .with_toast("✅ Request sent"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use soma_config::SomaConfig;
    use soma_core::{EventKind, UserProfile};
    use soma_test_utils::{MemoryUserStore, RecordingNotifier};

    fn event(action: &str) -> Event {
        Event {
            user_id: 42,
            kind: EventKind::Callback,
            action: action.to_string(),
            username: None,
            first_name: None,
            last_name: None,
            text: None,
            chat_id: 42,
            callback_id: None,
        }
    }

    #[tokio::test]
    async fn booking_form_counts_and_notifies() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let mut config = SomaConfig::default();
        config.telegram.admin_id = Some(1000);
        let ctx = HandlerContext::new(store.clone(), notifier.clone(), config);

        let reply = handle(&ctx, &event("booking_form")).await.unwrap();
        assert!(reply.text.contains("Request received"));

        assert_eq!(store.get(42).await.unwrap().consultation_requests, 1);
        assert_eq!(notifier.sent_to(1000).await.len(), 1);
    }
}
