// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator screens: statistics, user listing, and subscription grants.
//!
//! Everything here is gated on the single configured admin id; any other
//! user gets the generic unknown-action reply, not an error.

use std::collections::BTreeMap;

use soma_core::{Event, Reply, SomaError, UserRecord};
use tracing::{info, warn};

use crate::context::HandlerContext;
use crate::{menus, texts};

pub async fn handle(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    if !ctx.is_admin(event.user_id) {
        warn!(user_id = event.user_id, action = %event.action, "non-admin hit an admin action");
        return Ok(crate::menu::unknown());
    }

    match event.action.as_str() {
        "admin" => Ok(panel()),
        "admin_stats" => stats(ctx).await,
        "admin_users" => users(ctx).await,
        "admin_broadcast" => Ok(broadcast_placeholder()),
        a if a.starts_with("admin_grant_") => grant(ctx, a).await,
        _ => Ok(crate::menu::unknown()),
    }
}

fn panel() -> Reply {
    Reply::text("👨‍💼 <b>Admin panel</b>\n\nWelcome to the control panel.")
        .with_menu(menus::admin_menu())
}

async fn stats(ctx: &HandlerContext) -> Result<Reply, SomaError> {
    let all = match ctx.store.list_users().await {
        Ok(all) => all,
        Err(e) => {
            warn!(error = %e, "failed to load users for stats");
            return Ok(Reply::text("❌ Could not load statistics. Check the store.")
                .with_menu(menus::back_button("admin", "🔙 Back")));
        }
    };

    let total = all.len();
    let paid = all.iter().filter(|u| u.payment_active).count();
    let conversion = if total > 0 {
        paid as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
    for user in &all {
        *by_status.entry(user.status.as_str()).or_default() += 1;
    }

    let mut text = format!(
        "📊 <b>Bot statistics</b>\n\n\
         <b>Total users:</b> {total}\n\
         <b>Active subscriptions:</b> {paid}\n\
         <b>Conversion:</b> {conversion:.1}%\n\n\
         <b>By status:</b>\n"
    );
    for (status, count) in &by_status {
        text.push_str(&format!("• {status}: {count}\n"));
    }

    Ok(Reply::text(text).with_menu(menus::back_button("admin", "🔙 Back")))
}

async fn users(ctx: &HandlerContext) -> Result<Reply, SomaError> {
    let all = match ctx.store.list_users().await {
        Ok(all) => all,
        Err(e) => {
            warn!(error = %e, "failed to load user list");
            return Ok(Reply::text("❌ Could not load users. Check the store.")
                .with_menu(menus::back_button("admin", "🔙 Back")));
        }
    };

    let text = if all.is_empty() {
        "👥 <b>Users</b>\n\nNo registered users yet.".to_string()
    } else {
        let mut text = format!("👥 <b>Users ({})</b>\n\n", all.len());
        // Last 10 registrations, newest last.
        for user in all.iter().skip(all.len().saturating_sub(10)) {
            text.push_str(&format!("{}\n", user_line(user)));
        }
        if all.len() > 10 {
            text.push_str(&format!("\n<i>Showing the last 10 of {}</i>", all.len()));
        }
        text
    };

    Ok(Reply::text(text).with_menu(menus::back_button("admin", "🔙 Back")))
}

fn user_line(user: &UserRecord) -> String {
    let mark = if user.payment_active { "✅" } else { "❌" };
    let name = user.first_name.as_deref().unwrap_or("(no name)");
    let handle = user.username.as_deref().unwrap_or("no username");
    format!("{mark} {name} (@{handle}) — {}", user.status)
}

fn broadcast_placeholder() -> Reply {
    Reply::text(
        "📤 <b>Broadcast</b>\n\n<i>Broadcasting ships in a later version.</i>\n\n\
         For now, message users directly using their ids from the user list.",
    )
    .with_menu(menus::back_button("admin", "🔙 Back"))
}

/// `admin_grant_<id>`: verify-and-activate after a manual payment check.
async fn grant(ctx: &HandlerContext, action: &str) -> Result<Reply, SomaError> {
    let Ok(target) = action.trim_start_matches("admin_grant_").parse::<i64>() else {
        return Ok(Reply::text("Usage: admin_grant_&lt;user id&gt;")
            .with_menu(menus::back_button("admin", "🔙 Back")));
    };

    let days = ctx.config.subscription.duration_days;
    match ctx.store.set_subscription(target, days).await {
        Ok(true) => {
            info!(user_id = target, days, "subscription granted");
            ctx.notifier
                .notify(target, texts::SUBSCRIPTION_GRANTED)
                .await;
            Ok(
                Reply::text(format!("✅ Subscription activated for {target} ({days} days)."))
                    .with_menu(menus::back_button("admin", "🔙 Back")),
            )
        }
        Ok(false) => Ok(Reply::text(format!("❌ No user with id {target}."))
            .with_menu(menus::back_button("admin", "🔙 Back"))),
        Err(e) => {
            warn!(user_id = target, error = %e, "failed to grant subscription");
            Ok(Reply::text("❌ Store unavailable; try again.")
                .with_menu(menus::back_button("admin", "🔙 Back")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use soma_config::SomaConfig;
    use soma_core::{EventKind, UserProfile};
    use soma_test_utils::{MemoryUserStore, RecordingNotifier};

    const ADMIN: i64 = 1000;

    fn ctx(store: Arc<MemoryUserStore>, notifier: Arc<RecordingNotifier>) -> HandlerContext {
        let mut config = SomaConfig::default();
        config.telegram.admin_id = Some(ADMIN);
        HandlerContext::new(store, notifier, config)
    }

    fn event(user_id: i64, action: &str) -> Event {
        Event {
            user_id,
            kind: EventKind::Callback,
            action: action.to_string(),
            username: None,
            first_name: None,
            last_name: None,
            text: None,
            chat_id: user_id,
            callback_id: None,
        }
    }

    #[tokio::test]
    async fn non_admin_gets_unknown_reply() {
        let ctx = ctx(
            Arc::new(MemoryUserStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        let reply = handle(&ctx, &event(42, "admin_stats")).await.unwrap();
        assert!(reply.text.contains("didn't recognize"));
    }

    #[tokio::test]
    async fn stats_aggregate_totals_and_statuses() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(1, UserProfile::default()).await.unwrap();
        store.create_user(2, UserProfile::default()).await.unwrap();
        store.set_subscription(2, 30).await.unwrap();
        let ctx = ctx(store, Arc::new(RecordingNotifier::new()));

        let reply = handle(&ctx, &event(ADMIN, "admin_stats")).await.unwrap();
        assert!(reply.text.contains("Total users:</b> 2"));
        assert!(reply.text.contains("Active subscriptions:</b> 1"));
        assert!(reply.text.contains("50.0%"));
        assert!(reply.text.contains("new: 1"));
        assert!(reply.text.contains("subscribed: 1"));
    }

    #[tokio::test]
    async fn grant_activates_and_notifies_user() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ctx(store.clone(), notifier.clone());

        let reply = handle(&ctx, &event(ADMIN, "admin_grant_42")).await.unwrap();
        assert!(reply.text.contains("activated"));

        let record = store.get(42).await.unwrap();
        assert!(record.payment_active);
        assert_eq!(record.status, "subscribed");
        assert_eq!(notifier.sent_to(42).await.len(), 1);
    }

    #[tokio::test]
    async fn grant_for_missing_user_reports_cleanly() {
        let ctx = ctx(
            Arc::new(MemoryUserStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        let reply = handle(&ctx, &event(ADMIN, "admin_grant_404")).await.unwrap();
        assert!(reply.text.contains("No user"));
    }

    #[tokio::test]
    async fn malformed_grant_shows_usage() {
        let ctx = ctx(
            Arc::new(MemoryUserStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        let reply = handle(&ctx, &event(ADMIN, "admin_grant_abc")).await.unwrap();
        assert!(reply.text.contains("Usage"));
    }

    #[tokio::test]
    async fn store_outage_degrades_stats_screen() {
        let store = Arc::new(MemoryUserStore::new());
        store.fail_reads(true);
        let ctx = ctx(store, Arc::new(RecordingNotifier::new()));

        let reply = handle(&ctx, &event(ADMIN, "admin_stats")).await.unwrap();
        assert!(reply.text.contains("Could not load"));
    }
}
