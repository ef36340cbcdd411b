// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain handlers, screen texts, and menu layouts for the Soma bot.
//!
//! The [`Router`] implements [`EventHandler`] and is handed to the request
//! pipeline as its terminal stage. Each screen family lives in its own
//! module, mirroring the bot's menu structure.
//!
//! [`EventHandler`]: soma_core::EventHandler

pub mod admin;
pub mod booking;
pub mod contacts;
pub mod context;
pub mod info;
pub mod labs;
pub mod materials;
pub mod menu;
pub mod menus;
pub mod payment;
pub mod problems;
pub mod reviews;
pub mod router;
pub mod start;
pub mod texts;

pub use context::HandlerContext;
pub use router::Router;
