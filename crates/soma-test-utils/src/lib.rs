// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory fakes for Soma tests.
//!
//! `MemoryUserStore` substitutes for the SQLite store with failure
//! injection and read counting; `RecordingNotifier` captures outbound
//! notices for assertion.

pub mod memory_store;
pub mod notifier;

pub use memory_store::MemoryUserStore;
pub use notifier::RecordingNotifier;
