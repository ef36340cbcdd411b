// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main menu and help screens.

use soma_core::Reply;

use crate::{menus, texts};

pub fn handle() -> Reply {
    Reply::text(texts::MAIN_MENU).with_menu(menus::main_menu())
}

pub fn unknown() -> Reply {
    Reply::text(texts::UNKNOWN_ACTION).with_menu(menus::main_menu())
}
