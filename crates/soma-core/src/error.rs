// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Soma bot.

use thiserror::Error;

/// The primary error type used across Soma adapter traits and core operations.
#[derive(Debug, Error)]
pub enum SomaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// User store errors (database connection, query failure, serialization).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel errors (Telegram API failure, message format, delivery).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SomaError {
    /// True for failures where the user store state must be treated as
    /// unknown: unreachable backend or an expired deadline.
    pub fn is_transient_store(&self) -> bool {
        matches!(self, SomaError::Store { .. } | SomaError::Timeout { .. })
    }
}
