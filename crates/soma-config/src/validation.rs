// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive intervals and non-empty match lists.

use crate::diagnostic::ConfigError;
use crate::model::SomaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &SomaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.storage.timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "storage.timeout_ms must be positive".to_string(),
        });
    }

    if config.throttle.min_interval_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "throttle.min_interval_ms must be positive".to_string(),
        });
    }

    // Retention shorter than the spacing interval would prune entries the
    // limiter still needs to compare against.
    if config.throttle.retention_secs * 1000 < config.throttle.min_interval_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "throttle.retention_secs ({}s) must cover throttle.min_interval_ms ({}ms)",
                config.throttle.retention_secs, config.throttle.min_interval_ms
            ),
        });
    }

    if config.subscription.duration_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "subscription.duration_days must be at least 1, got {}",
                config.subscription.duration_days
            ),
        });
    }

    if let Some(admin_id) = config.telegram.admin_id
        && admin_id <= 0
    {
        errors.push(ConfigError::Validation {
            message: format!("telegram.admin_id must be positive, got {admin_id}"),
        });
    }

    // An empty prefix would match every action and defeat classification.
    for prefix in &config.access.free_prefixes {
        if prefix.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "access.free_prefixes must not contain empty entries".to_string(),
            });
            break;
        }
    }

    for marker in &config.access.gated_markers {
        if marker.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "access.gated_markers must not contain empty entries".to_string(),
            });
            break;
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SomaConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = SomaConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn zero_interval_fails_validation() {
        let mut config = SomaConfig::default();
        config.throttle.min_interval_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("min_interval_ms"))
        ));
    }

    #[test]
    fn retention_shorter_than_interval_fails() {
        let mut config = SomaConfig::default();
        config.throttle.min_interval_ms = 5000;
        config.throttle.retention_secs = 2;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("retention_secs"))
        ));
    }

    #[test]
    fn empty_free_prefix_entry_fails() {
        let mut config = SomaConfig::default();
        config.access.free_prefixes.push("".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("free_prefixes"))
        ));
    }

    #[test]
    fn negative_admin_id_fails() {
        let mut config = SomaConfig::default();
        config.telegram.admin_id = Some(-5);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("admin_id"))
        ));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = SomaConfig::default();
        config.storage.database_path = "".to_string();
        config.subscription.duration_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
