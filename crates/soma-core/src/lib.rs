// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Soma bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Soma workspace: the user record model,
//! the normalized inbound event, access annotations, and the `UserStore` /
//! `Notifier` / `EventHandler` seams implemented by sibling crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SomaError;
pub use types::{
    AccessContext, AccessDecision, ActionClass, Button, CounterField, Event, EventKind, Menu,
    Reply, UserId, UserPatch, UserProfile, UserRecord,
};

pub use traits::{EventHandler, Notifier, UserStore};
