// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Information screens.

use soma_core::Reply;

use crate::{menus, texts};

pub fn handle(action: &str) -> Reply {
    match action {
        "info_about" => back(texts::INFO_ABOUT),
        "info_how" => back(texts::INFO_HOW),
        "info_faq" => back(texts::INFO_FAQ),
        "info_author" => back(texts::INFO_AUTHOR),
        _ => Reply::text(texts::INFO).with_menu(menus::info_menu()),
    }
}

fn back(text: &str) -> Reply {
    Reply::text(text).with_menu(menus::back_button("info", "🔙 Back"))
}
