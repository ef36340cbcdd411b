// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! "I have a problem" flow: records the selection and points at a lab.

use soma_core::{Event, Reply, SomaError};

use crate::context::HandlerContext;
use crate::{menus, texts};

struct Problem {
    action: &'static str,
    title: &'static str,
    lab_hint: &'static str,
    lab_action: &'static str,
}

const PROBLEMS: &[Problem] = &[
    Problem {
        action: "problem_sleep",
        title: "Poor sleep",
        lab_hint: "the evening practices in Mind Lab",
        lab_action: "lab_mind",
    },
    Problem {
        action: "problem_stress",
        title: "Stress and anxiety",
        lab_hint: "recovery breathing in Breath Lab",
        lab_action: "lab_breath",
    },
    Problem {
        action: "problem_energy",
        title: "No energy",
        lab_hint: "activating breathing in Breath Lab",
        lab_action: "lab_breath",
    },
    Problem {
        action: "problem_focus",
        title: "Can't focus",
        lab_hint: "attention work in Mind Lab",
        lab_action: "lab_mind",
    },
    Problem {
        action: "problem_tension",
        title: "Body tension",
        lab_hint: "gentle mobilization in Body Lab",
        lab_action: "lab_body",
    },
];

pub async fn handle(ctx: &HandlerContext, event: &Event) -> Result<Reply, SomaError> {
    let action = event.action.as_str();
    if action == "problems" {
        return Ok(Reply::text(texts::PROBLEMS_INTRO).with_menu(menus::problems_menu()));
    }

    let Some(problem) = PROBLEMS.iter().find(|p| p.action == action) else {
        return Ok(crate::menu::unknown());
    };

    // Record the selection; duplicates are de-duplicated by the store.
    if let Err(e) = ctx.store.add_problem(event.user_id, problem.title).await {
        tracing::warn!(user_id = event.user_id, error = %e, "failed to record problem selection");
    }

    Ok(
        Reply::text(texts::problem_acknowledged(problem.title, problem.lab_hint)).with_menu(
            soma_core::Menu::new(vec![
                vec![soma_core::Button::new("▶️ Open the lab", problem.lab_action)],
                vec![soma_core::Button::new(
                    "📅 Book a consultation",
                    "booking",
                )],
                vec![soma_core::Button::new("🏠 Main menu", "menu")],
            ]),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use soma_config::SomaConfig;
    use soma_core::{EventKind, UserProfile};
    use soma_test_utils::{MemoryUserStore, RecordingNotifier};

    fn ctx(store: Arc<MemoryUserStore>) -> HandlerContext {
        HandlerContext::new(store, Arc::new(RecordingNotifier::new()), SomaConfig::default())
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
    async fn problems_screen_lists_options() {
        let ctx = ctx(Arc::new(MemoryUserStore::new()));
        let reply = handle(&ctx, &event("problems")).await.unwrap();
        assert!(reply.text.contains("bothering you"));
        assert!(reply.menu.unwrap().rows.len() >= 5);
    }

    #[tokio::test]
    async fn selection_is_recorded_once() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let ctx = ctx(store.clone());

        handle(&ctx, &event("problem_sleep")).await.unwrap();
        handle(&ctx, &event("problem_sleep")).await.unwrap();
        handle(&ctx, &event("problem_stress")).await.unwrap();

        let record = store.get(42).await.unwrap();
        assert_eq!(record.problems_selected, vec!["Poor sleep", "Stress and anxiety"]);
    }

    #[tokio::test]
    async fn reply_points_at_matching_lab() {
        let store = Arc::new(MemoryUserStore::new());
        store.create_user(42, UserProfile::default()).await.unwrap();
        let ctx = ctx(store);

        let reply = handle(&ctx, &event("problem_tension")).await.unwrap();
        let actions: Vec<String> = reply
            .menu
            .unwrap()
            .rows
            .iter()
            .flatten()
            .map(|b| b.action.clone())
            .collect();
        assert!(actions.contains(&"lab_body".to_string()));
        assert!(actions.contains(&"booking".to_string()));
    }
}
