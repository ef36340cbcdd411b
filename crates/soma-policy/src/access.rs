// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription access decisions.
//!
//! Pure classification of action identifiers plus the gated-content check
//! against the user store. Gated checks fail closed: an unreachable or
//! slow store yields Deny, never an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use soma_config::model::AccessConfig;
use soma_core::{
    AccessContext, AccessDecision, ActionClass, SomaError, UserId, UserPatch, UserRecord,
    UserStore,
};
use tracing::{debug, info, warn};

/// Lazily correct an expired subscription.
///
/// Pure: returns the corrected record and whether the correction must be
/// persisted. A record whose `subscription_end` is strictly before `now`
/// loses `payment_active` and is labeled "expired".
pub fn correct_expiry(mut record: UserRecord, now: DateTime<Utc>) -> (UserRecord, bool) {
    if record.payment_active
        && let Some(end) = record.subscription_end
        && end < now
    {
        record.payment_active = false;
        record.status = "expired".to_string();
        return (record, true);
    }
    (record, false)
}

/// Decides whether a user may execute a given action.
///
/// Holds the classification tables and an injected [`UserStore`] handle.
/// The only mutation this type performs is the corrective expiry write.
pub struct AccessPolicy {
    store: Arc<dyn UserStore>,
    free_prefixes: Vec<String>,
    gated_markers: Vec<String>,
    default_class: ActionClass,
    store_timeout: Duration,
}

impl AccessPolicy {
    pub fn new(store: Arc<dyn UserStore>, config: &AccessConfig, store_timeout: Duration) -> Self {
        Self {
            store,
            free_prefixes: config.free_prefixes.clone(),
            gated_markers: config.gated_markers.clone(),
            default_class: config.default_class,
            store_timeout,
        }
    }

    /// Statically classify an action identifier.
    ///
    /// Free prefixes win over gated markers; anything matching neither
    /// falls back to the configured default class.
    pub fn classify(&self, action: &str) -> ActionClass {
        if self
            .free_prefixes
            .iter()
            .any(|prefix| action.starts_with(prefix.as_str()))
        {
            return ActionClass::Free;
        }
        if self
            .gated_markers
            .iter()
            .any(|marker| action.contains(marker.as_str()))
        {
            return ActionClass::Gated;
        }
        debug!(
            action,
            default = %self.default_class,
            "action matched no classification rule; using default class"
        );
        self.default_class
    }

    /// Decide access for one action.
    ///
    /// Free actions are allowed without consulting the store.
    pub async fn check_access(&self, user_id: UserId, action: &str) -> AccessDecision {
        match self.classify(action) {
            ActionClass::Free => AccessDecision::Allow,
            ActionClass::Gated => self.check_gated(user_id).await,
        }
    }

    /// Classify and decide in one step, producing the pipeline annotation.
    pub async fn annotate(&self, user_id: UserId, action: &str) -> AccessContext {
        match self.classify(action) {
            ActionClass::Free => AccessContext::free(),
            ActionClass::Gated => AccessContext::gated(self.check_gated(user_id).await),
        }
    }

    async fn check_gated(&self, user_id: UserId) -> AccessDecision {
        let record = match self.fetch_user(user_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!(user_id, "gated access denied: no user record");
                return AccessDecision::Deny;
            }
            Err(e) => {
                warn!(user_id, error = %e, "gated access denied: store unavailable");
                return AccessDecision::Deny;
            }
        };

        let (corrected, needs_persist) = correct_expiry(record, Utc::now());
        if needs_persist {
            // Best-effort: a failed corrective write does not change the
            // decision.
            let patch = UserPatch {
                payment_active: Some(false),
                status: Some("expired".to_string()),
                ..Default::default()
            };
            match tokio::time::timeout(self.store_timeout, self.store.update_user(user_id, patch))
                .await
            {
                Ok(Ok(_)) => info!(user_id, "subscription expired; record corrected"),
                Ok(Err(e)) => warn!(user_id, error = %e, "failed to persist expiry correction"),
                Err(_) => warn!(user_id, "expiry correction write timed out"),
            }
        }

        if corrected.payment_active {
            AccessDecision::Allow
        } else {
            info!(user_id, "gated access denied: no active subscription");
            AccessDecision::Deny
        }
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<Option<UserRecord>, SomaError> {
        tokio::time::timeout(self.store_timeout, self.store.get_user(user_id))
            .await
            .map_err(|_| SomaError::Timeout {
                duration: self.store_timeout,
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use soma_core::UserProfile;
    use soma_test_utils::MemoryUserStore;

    fn policy(store: Arc<MemoryUserStore>) -> AccessPolicy {
        AccessPolicy::new(store, &AccessConfig::default(), Duration::from_secs(5))
    }

    fn paid_record(id: UserId, end: Option<DateTime<Utc>>) -> UserRecord {
        let mut record = UserRecord::new(id, UserProfile::default(), Utc::now());
        record.payment_active = true;
        record.status = "subscribed".to_string();
        record.subscription_end = end;
        record
    }

    #[test]
    fn classify_free_prefixes() {
        let store = Arc::new(MemoryUserStore::new());
        let policy = policy(store);
        for action in [
            "menu",
            "start",
            "subscribe_info",
            "payment_confirm",
            "problems",
            "booking_form",
        ] {
            assert_eq!(policy.classify(action), ActionClass::Free, "{action}");
        }
    }

    #[test]
    fn classify_gated_markers() {
        let store = Arc::new(MemoryUserStore::new());
        let policy = policy(store);
        for action in [
            "materials",
            "materials_popular",
            "format_video",
            "get_material_12",
        ] {
            assert_eq!(policy.classify(action), ActionClass::Gated, "{action}");
        }
    }

    #[test]
    fn unmatched_action_uses_default_class() {
        let store = Arc::new(MemoryUserStore::new());
        let free_policy = policy(store.clone());
        assert_eq!(free_policy.classify("lab_breath"), ActionClass::Free);
        assert_eq!(free_policy.classify("definitely_unknown"), ActionClass::Free);

        let config = AccessConfig {
            default_class: ActionClass::Gated,
            ..Default::default()
        };
        let gated_policy = AccessPolicy::new(store, &config, Duration::from_secs(5));
        assert_eq!(
            gated_policy.classify("definitely_unknown"),
            ActionClass::Gated
        );
    }

    #[tokio::test]
    async fn free_action_allows_without_store_read() {
        let store = Arc::new(MemoryUserStore::new());
        let policy = policy(store.clone());

        assert_eq!(policy.check_access(42, "menu").await, AccessDecision::Allow);
        assert_eq!(store.reads(), 0, "free actions must not consult the store");
    }

    #[tokio::test]
    async fn gated_action_denied_for_missing_record() {
        let store = Arc::new(MemoryUserStore::new());
        let policy = policy(store);
        assert_eq!(
            policy.check_access(42, "materials").await,
            AccessDecision::Deny
        );
    }

    #[tokio::test]
    async fn gated_action_allowed_for_active_subscription() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .seed(paid_record(42, Some(Utc::now() + ChronoDuration::days(30))))
            .await;
        let policy = policy(store);
        assert_eq!(
            policy.check_access(42, "materials").await,
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn gated_action_allowed_without_end_date() {
        let store = Arc::new(MemoryUserStore::new());
        store.seed(paid_record(42, None)).await;
        let policy = policy(store);
        assert_eq!(
            policy.check_access(42, "get_material_3").await,
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn expired_subscription_is_denied_and_corrected() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .seed(paid_record(42, Some(Utc::now() - ChronoDuration::days(1))))
            .await;
        let policy = policy(store.clone());

        assert_eq!(
            policy.check_access(42, "materials").await,
            AccessDecision::Deny
        );

        // The corrective write landed.
        let record = store.get(42).await.unwrap();
        assert!(!record.payment_active);
        assert_eq!(record.status, "expired");
    }

    #[tokio::test]
    async fn correction_write_failure_still_denies() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .seed(paid_record(42, Some(Utc::now() - ChronoDuration::days(1))))
            .await;
        store.fail_writes(true);
        let policy = policy(store);

        assert_eq!(
            policy.check_access(42, "materials").await,
            AccessDecision::Deny
        );
    }

    #[tokio::test]
    async fn store_outage_fails_closed() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .seed(paid_record(42, Some(Utc::now() + ChronoDuration::days(30))))
            .await;
        store.fail_reads(true);
        let policy = policy(store);

        assert_eq!(
            policy.check_access(42, "materials").await,
            AccessDecision::Deny
        );
    }

    #[tokio::test]
    async fn annotate_marks_denied_gated_actions() {
        let store = Arc::new(MemoryUserStore::new());
        let policy = policy(store);

        let free = policy.annotate(42, "menu").await;
        assert_eq!(free.class, ActionClass::Free);
        assert!(!free.requires_subscription);

        let gated = policy.annotate(42, "materials").await;
        assert_eq!(gated.class, ActionClass::Gated);
        assert_eq!(gated.decision, AccessDecision::Deny);
        assert!(gated.requires_subscription);
    }

    #[test]
    fn correct_expiry_is_pure_and_flags_persistence() {
        let now = Utc::now();
        let active = paid_record(1, Some(now + ChronoDuration::days(1)));
        let (unchanged, persist) = correct_expiry(active.clone(), now);
        assert_eq!(unchanged, active);
        assert!(!persist);

        let expired = paid_record(1, Some(now - ChronoDuration::seconds(1)));
        let (corrected, persist) = correct_expiry(expired, now);
        assert!(persist);
        assert!(!corrected.payment_active);
        assert_eq!(corrected.status, "expired");

        // Already-inactive records are not re-flagged.
        let mut lapsed = paid_record(1, Some(now - ChronoDuration::days(1)));
        lapsed.payment_active = false;
        let (_, persist) = correct_expiry(lapsed, now);
        assert!(!persist);
    }
}
