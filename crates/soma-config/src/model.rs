// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Soma bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use soma_core::ActionClass;

/// Top-level Soma configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SomaConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// User store backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Per-user request throttling settings.
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Action classification settings for the access policy.
    #[serde(default)]
    pub access: AccessConfig,

    /// Subscription offer settings.
    #[serde(default)]
    pub subscription: SubscriptionConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "soma".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram transport.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram user id of the human operator. Receives payment and
    /// booking notifications; unlocks the admin screens.
    #[serde(default)]
    pub admin_id: Option<i64>,
}

/// User store backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// Deadline for a single store call on the access path, in
    /// milliseconds. An expired deadline is treated as a transient store
    /// failure (gated checks fail closed).
    #[serde(default = "default_store_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            timeout_ms: default_store_timeout_ms(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("soma").join("soma.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("soma.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_store_timeout_ms() -> u64 {
    5000
}

/// Per-user request throttling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// Minimum spacing between two admitted actions from the same user,
    /// in milliseconds.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Entries idle for longer than this are pruned from the throttle
    /// table, in seconds.
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            retention_secs: default_retention_secs(),
        }
    }
}

fn default_min_interval_ms() -> u64 {
    500
}

fn default_retention_secs() -> u64 {
    60
}

/// Action classification configuration.
///
/// An action starting with a free prefix is FREE; otherwise an action
/// containing a gated marker is GATED; anything else falls back to
/// `default_class`. The shipped fallback is `free`, matching the observed
/// behavior of manual subscription bots; flip it to `gated` to make
/// unrecognized actions require a subscription.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Action prefixes that never require a subscription.
    #[serde(default = "default_free_prefixes")]
    pub free_prefixes: Vec<String>,

    /// Substring markers identifying gated library content.
    #[serde(default = "default_gated_markers")]
    pub gated_markers: Vec<String>,

    /// Classification for actions matching neither list.
    #[serde(default = "default_class")]
    pub default_class: ActionClass,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            free_prefixes: default_free_prefixes(),
            gated_markers: default_gated_markers(),
            default_class: default_class(),
        }
    }
}

fn default_free_prefixes() -> Vec<String> {
    [
        "menu",
        "start",
        "help",
        "problems",
        "contacts",
        "booking",
        "reviews",
        "subscribe",
        "subscribe_info",
        "pay",
        "payment_confirm",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_gated_markers() -> Vec<String> {
    [
        "material",
        "format_",
        "materials_theme",
        "materials_popular",
        "get_material",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_class() -> ActionClass {
    ActionClass::Free
}

/// Subscription offer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionConfig {
    /// Monthly price shown on the offer screens, in rubles.
    #[serde(default = "default_price_rub")]
    pub price_rub: u32,

    /// Days of access granted per payment.
    #[serde(default = "default_duration_days")]
    pub duration_days: i64,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            price_rub: default_price_rub(),
            duration_days: default_duration_days(),
        }
    }
}

fn default_price_rub() -> u32 {
    990
}

fn default_duration_days() -> i64 {
    30
}
