// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reviews screens.

use soma_core::{Button, Menu, Reply};

use crate::{menus, texts};

pub fn handle(action: &str) -> Reply {
    match action {
        "leave_review" => Reply::text(texts::LEAVE_REVIEW).with_menu(menus::back_to_menu()),
        _ => Reply::text(texts::REVIEWS).with_menu(Menu::new(vec![
            vec![Button::new("✍️ Leave a review", "leave_review")],
            vec![Button::new("🏠 Main menu", "menu")],
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviews_screen_offers_leaving_one() {
        let reply = handle("reviews");
        let actions: Vec<String> = reply
            .menu
            .unwrap()
            .rows
            .iter()
            .flatten()
            .map(|b| b.action.clone())
            .collect();
        assert!(actions.contains(&"leave_review".to_string()));
    }
}
