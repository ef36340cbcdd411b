// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription offer and the manual payment flow.
//!
//! No payment processor: the user transfers money by hand, claims the
//! payment, and the operator verifies it and grants the subscription from
//! the admin screens.

use chrono::Utc;
use soma_core::{Event, Reply, SomaError, UserPatch};
use tracing::{info, warn};

use crate::context::HandlerContext;
use crate::{menus, texts};

pub async fn handle(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    match event.action.as_str() {
        "subscribe" => Ok(offer(ctx)),
        "subscribe_info" => Ok(details(ctx)),
        "pay" => pay(ctx, event).await,
        "payment_confirm" => confirm(ctx, event).await,
        _ => Ok(crate::menu::unknown()),
    }
}

fn offer(ctx: &HandlerContext) -> Reply {
    let sub = &ctx.config.subscription;
    Reply::text(texts::subscription_offer(sub.price_rub, sub.duration_days))
        .with_menu(menus::subscription_menu(sub.price_rub))
}

fn details(ctx: &HandlerContext) -> Reply {
    let sub = &ctx.config.subscription;
    Reply::text(texts::subscription_details(sub.price_rub, sub.duration_days))
        .with_menu(menus::subscription_menu(sub.price_rub))
}

/// Show the payment requisites and tell the operator to expect a payment.
async fn pay(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    let sub = &ctx.config.subscription;

    let patch = UserPatch {
        status: Some("awaiting-payment".to_string()),
        ..Default::default()
    };
    if let Err(e) = ctx.store.update_user(event.user_id, patch).await {
        warn!(user_id = event.user_id, error = %e, "failed to mark user awaiting payment");
    }

    ctx.notify_admin(&format!(
        "💰 Payment request\n\nFrom: {} \nAmount: {}₽\nDate: {}\n\nAwaiting transfer.",
        event.actor(),
        sub.price_rub,
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
    ))
    .await;
    info!(user_id = event.user_id, "payment requisites shown");

    Ok(
        Reply::text(texts::payment_requisites(sub.price_rub, sub.duration_days))
            .with_menu(menus::payment_menu()),
    )
}

/// The user claims to have paid; the operator takes it from here.
async fn confirm(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    let sub = &ctx.config.subscription;

    let patch = UserPatch {
        status: Some("payment-claimed".to_string()),
        ..Default::default()
    };
    if let Err(e) = ctx.store.update_user(event.user_id, patch).await {
        warn!(user_id = event.user_id, error = %e, "failed to mark payment claim");
    }

    ctx.notify_admin(&format!(
        "✅ Payment claimed\n\nFrom: {}\nAmount: {}₽\n\n\
         Verify the transfer, then send admin_grant_{} to activate access.",
        event.actor(),
        sub.price_rub,
        event.user_id,
    ))
    .await;
    info!(user_id = event.user_id, "payment claim forwarded to operator");

    Ok(Reply::text(texts::PAYMENT_CLAIMED)
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

    fn ctx_with_admin(
        store: Arc<MemoryUserStore>,
        notifier: Arc<RecordingNotifier>,
    ) -> HandlerContext {
        let mut config = SomaConfig::default();
        config.telegram.admin_id = Some(1000);
        HandlerContext::new(store, notifier, config)
    }

    fn event(action: &str) -> Event {
        Event {
            user_id: 42,
            kind: EventKind::Callback,
            action: action.to_string(),
            username: Some("ann".to_string()),
            first_name: None,
            last_name: None,
            text: None,
            chat_id: 42,
            callback_id: None,
        }
    }

    #[tokio::test]
    async fn offer_shows_price() {
        let ctx = ctx_with_admin(
            Arc::new(MemoryUserStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        let reply = handle(&ctx, &event("subscribe")).await.unwrap();
        assert!(reply.text.contains("990₽"));
    }

    #[tokio::test]
    async fn pay_marks_status_and_notifies_operator() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ctx_with_admin(store.clone(), notifier.clone());

        let reply = handle(&ctx, &event("pay")).await.unwrap();
        assert!(reply.text.contains("Payment details"));

        assert_eq!(store.get(42).await.unwrap().status, "awaiting-payment");
        let admin_messages = notifier.sent_to(1000).await;
        assert_eq!(admin_messages.len(), 1);
        assert!(admin_messages[0].contains("Payment request"));
    }

    #[tokio::test]
    async fn confirm_forwards_grant_instruction() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ctx_with_admin(store.clone(), notifier.clone());

        let reply = handle(&ctx, &event("payment_confirm")).await.unwrap();
        assert!(reply.toast.is_some());

        assert_eq!(store.get(42).await.unwrap().status, "payment-claimed");
        let admin_messages = notifier.sent_to(1000).await;
        assert!(admin_messages[0].contains("admin_grant_42"));
    }

    #[tokio::test]
    async fn missing_admin_drops_notification_quietly() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = HandlerContext::new(store, notifier.clone(), SomaConfig::default());

        handle(&ctx, &event("pay")).await.unwrap();
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn store_outage_still_shows_requisites() {
        let store = Arc::new(MemoryUserStore::new());
        store.fail_writes(true);
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ctx_with_admin(store, notifier);

        let reply = handle(&ctx, &event("pay")).await.unwrap();
        assert!(reply.text.contains("Payment details"));
    }
}
