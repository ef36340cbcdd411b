// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./soma.toml` > `~/.config/soma/soma.toml` >
//! `/etc/soma/soma.toml` with environment variable overrides via the
//! `SOMA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SomaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/soma/soma.toml` (system-wide)
/// 3. `~/.config/soma/soma.toml` (user XDG config)
/// 4. `./soma.toml` (local directory)
/// 5. `SOMA_*` environment variables
pub fn load_config() -> Result<SomaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and inline configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SomaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SomaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SomaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SomaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for
/// diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SomaConfig::default()))
        .merge(Toml::file("/etc/soma/soma.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("soma/soma.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("soma.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SOMA_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    const SECTIONS: [&str; 6] = [
        "bot",
        "telegram",
        "storage",
        "throttle",
        "access",
        "subscription",
    ];

    Env::prefixed("SOMA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SOMA_THROTTLE_MIN_INTERVAL_MS -> "throttle_min_interval_ms"
        // The section match is anchored at the start: `telegram_bot_token`
        // must become `telegram.bot_token`, not `telegram_bot.token`.
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str.strip_prefix(section)
                && let Some(rest) = rest.strip_prefix('_')
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_owned().into()
    })
}
