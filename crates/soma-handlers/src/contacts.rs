// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contacts screen.

use soma_core::Reply;

use crate::{menus, texts};

pub fn handle() -> Reply {
    Reply::text(texts::CONTACTS).with_menu(menus::back_to_menu())
}
