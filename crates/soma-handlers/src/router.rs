// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps action identifiers to their handlers.

use async_trait::async_trait;

use soma_core::{AccessContext, Event, EventHandler, Reply, SomaError};

use crate::context::HandlerContext;
use crate::{admin, booking, contacts, info, labs, materials, menu, payment, problems, reviews,
    start};

/// The terminal stage of the request pipeline: one match over the action
/// families the bot understands.
pub struct Router {
    ctx: HandlerContext,
}

impl Router {
    pub fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventHandler for Router {
    async fn handle(&self, event: &Event, access: &AccessContext) -> Result<Reply, SomaError> {
        let ctx = &self.ctx;
        let action = event.action.as_str();

        match action {
            "start" => start::handle(ctx, event).await,
            "menu" | "help" => Ok(menu::handle()),
            "contacts" => Ok(contacts::handle()),
            "reviews" | "leave_review" => Ok(reviews::handle(action)),
            "booking" | "booking_form" => booking::handle(ctx, event).await,
            "subscribe" | "subscribe_info" | "pay" | "payment_confirm" => {
                payment::handle(ctx, event).await
            }
            a if a == "problems" || a.starts_with("problem_") => {
                problems::handle(ctx, event).await
            }
            a if a.starts_with("materials") || a.starts_with("format_")
                || a.starts_with("get_material_") =>
            {
                materials::handle(ctx, event, access).await
            }
            a if a.starts_with("lab_")
                || a.starts_with("recovery_day")
                || a.starts_with("breath_")
                || a.starts_with("body_")
                || a.starts_with("core_")
                || a.starts_with("mind_")
                || a.starts_with("practice_") =>
            {
                Ok(labs::handle(action))
            }
            a if a.starts_with("info") => Ok(info::handle(action)),
            a if a.starts_with("admin") => admin::handle(ctx, event).await,
            _ => Ok(menu::unknown()),
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

    fn router(store: Arc<MemoryUserStore>) -> Router {
        Router::new(HandlerContext::new(
            store,
            Arc::new(RecordingNotifier::new()),
            SomaConfig::default(),
        ))
    }

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
    async fn every_menu_action_resolves_to_a_screen() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let router = router(store);
        let free = AccessContext::free();

        for action in [
            "start",
            "menu",
            "help",
            "lab_recovery",
            "lab_breath",
            "breath_recovery",
            "recovery_day1",
            "problems",
            "problem_sleep",
            "subscribe",
            "subscribe_info",
            "pay",
            "payment_confirm",
            "booking",
            "booking_form",
            "contacts",
            "reviews",
            "leave_review",
            "info",
            "info_faq",
        ] {
            let reply = router.handle(&event(action), &free).await.unwrap();
            assert!(!reply.text.is_empty(), "{action} produced empty text");
        }
    }

    #[tokio::test]
    async fn unrecognized_action_falls_back_to_menu_hint() {
        let router = router(Arc::new(MemoryUserStore::new()));
        let reply = router
            .handle(&event("certainly_not_a_thing"), &AccessContext::free())
            .await
            .unwrap();
        assert!(reply.text.contains("didn't recognize"));
    }

    #[tokio::test]
    async fn materials_route_respects_annotation() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let router = router(store);

        let denied = soma_core::AccessContext::gated(soma_core::AccessDecision::Deny);
        let reply = router.handle(&event("materials"), &denied).await.unwrap();
        assert!(reply.text.contains("needs a subscription"));

        let allowed = soma_core::AccessContext::gated(soma_core::AccessDecision::Allow);
        let reply = router.handle(&event("materials"), &allowed).await.unwrap();
        assert!(reply.text.contains("Materials library"));
    }
}
