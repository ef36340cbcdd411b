// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Soma bot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Telegram user identifier. Externally assigned, immutable.
pub type UserId = i64;

/// One row of the user store. Created on first contact, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// Advisory lifecycle label ("new", "awaiting-payment", "payment-claimed",
    /// "subscribed", "expired"). Never consulted for access decisions.
    pub status: String,
    /// Authoritative flag for gated content access.
    pub payment_active: bool,
    pub subscription_start: Option<DateTime<Utc>>,
    pub subscription_end: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
    /// Touched on every mutation.
    pub last_activity: DateTime<Utc>,
    pub materials_viewed: u32,
    pub consultation_requests: u32,
    /// Insertion-ordered, de-duplicated free-text labels.
    pub problems_selected: Vec<String>,
    /// Operator-maintained free text. Never written by automated logic.
    pub notes: String,
}

impl UserRecord {
    /// A fresh record for a user seen for the first time.
    pub fn new(id: UserId, profile: UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            status: "new".to_string(),
            payment_active: false,
            subscription_start: None,
            subscription_end: None,
            registered_at: now,
            last_activity: now,
            materials_viewed: 0,
            consultation_requests: 0,
            problems_selected: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Profile fields captured at registration. Opaque strings, not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Partial update of a [`UserRecord`]. `None` leaves the field unchanged.
///
/// Subscription timestamps are doubly optional so a patch can explicitly
/// clear them (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub status: Option<String>,
    pub payment_active: Option<bool>,
    pub subscription_start: Option<Option<DateTime<Utc>>>,
    pub subscription_end: Option<Option<DateTime<Utc>>>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }

    /// Apply this patch to a record in place. `last_activity` is the
    /// store's concern and is not touched here.
    pub fn apply(&self, record: &mut UserRecord) {
        if let Some(status) = &self.status {
            record.status = status.clone();
        }
        if let Some(active) = self.payment_active {
            record.payment_active = active;
        }
        if let Some(start) = self.subscription_start {
            record.subscription_start = start;
        }
        if let Some(end) = self.subscription_end {
            record.subscription_end = end;
        }
        if let Some(phone) = &self.phone {
            record.phone = Some(phone.clone());
        }
        if let Some(notes) = &self.notes {
            record.notes = notes.clone();
        }
    }
}

/// Monotonic per-user counters. The string form is the store column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum CounterField {
    #[strum(serialize = "materials_viewed")]
    MaterialsViewed,
    #[strum(serialize = "consultation_requests")]
    ConsultationRequests,
}

/// How an inbound event reached the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum EventKind {
    #[strum(serialize = "command")]
    Command,
    #[strum(serialize = "callback")]
    Callback,
}

/// An inbound interaction, normalized by the transport layer.
///
/// `action` is the command name (without the slash) or the callback data;
/// it is the unit the access policy classifies.
#[derive(Debug, Clone)]
pub struct Event {
    pub user_id: UserId,
    pub kind: EventKind,
    pub action: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Raw message text, when the event came from a message.
    pub text: Option<String>,
    /// Chat to reply into. Equals `user_id` in private chats.
    pub chat_id: i64,
    /// Callback query id, required to clear the client-side spinner.
    pub callback_id: Option<String>,
}

impl Event {
    /// Short log form: "12345 (@name)" when a username is known.
    pub fn actor(&self) -> String {
        match &self.username {
            Some(name) => format!("{} (@{name})", self.user_id),
            None => self.user_id.to_string(),
        }
    }
}

/// Static classification of an action identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionClass {
    #[strum(serialize = "free")]
    Free,
    #[strum(serialize = "gated")]
    Gated,
}

/// The access policy's verdict for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AccessDecision {
    Allow,
    Deny,
}

/// Access annotation attached to an event before its handler runs.
///
/// The pipeline never halts on Deny; the handler reads
/// `requires_subscription` and decides how to present the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext {
    pub class: ActionClass,
    pub decision: AccessDecision,
    pub requires_subscription: bool,
}

impl AccessContext {
    /// Annotation for a free action: allowed, no store consulted.
    pub fn free() -> Self {
        Self {
            class: ActionClass::Free,
            decision: AccessDecision::Allow,
            requires_subscription: false,
        }
    }

    /// Annotation for a gated action with the given verdict.
    pub fn gated(decision: AccessDecision) -> Self {
        Self {
            class: ActionClass::Gated,
            decision,
            requires_subscription: decision == AccessDecision::Deny,
        }
    }
}

/// A single inline button: visible label plus the action it emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Transport-neutral menu: rows of buttons. The Telegram adapter renders
/// this as an inline keyboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub rows: Vec<Vec<Button>>,
}

impl Menu {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }
}

/// A handler's response: screen text, an optional menu, and an optional
/// transient toast (rendered as a callback answer on Telegram).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
    pub toast: Option<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
            toast: None,
        }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    pub fn with_toast(mut self, toast: impl Into<String>) -> Self {
        self.toast = Some(toast.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn new_record_starts_unpaid() {
        let record = UserRecord::new(42, UserProfile::default(), now());
        assert_eq!(record.id, 42);
        assert_eq!(record.status, "new");
        assert!(!record.payment_active);
        assert_eq!(record.materials_viewed, 0);
        assert_eq!(record.consultation_requests, 0);
        assert!(record.problems_selected.is_empty());
        assert!(record.subscription_end.is_none());
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut record = UserRecord::new(1, UserProfile::default(), now());
        let patch = UserPatch {
            status: Some("subscribed".to_string()),
            payment_active: Some(true),
            ..Default::default()
        };
        patch.apply(&mut record);
        assert_eq!(record.status, "subscribed");
        assert!(record.payment_active);
        assert!(record.subscription_end.is_none(), "unset fields untouched");
    }

    #[test]
    fn patch_can_clear_subscription_window() {
        let mut record = UserRecord::new(1, UserProfile::default(), now());
        record.subscription_end = Some(now());
        let patch = UserPatch {
            subscription_end: Some(None),
            ..Default::default()
        };
        patch.apply(&mut record);
        assert!(record.subscription_end.is_none());
    }

    #[test]
    fn counter_field_names_match_store_columns() {
        assert_eq!(CounterField::MaterialsViewed.to_string(), "materials_viewed");
        assert_eq!(
            CounterField::ConsultationRequests.to_string(),
            "consultation_requests"
        );
        assert_eq!(
            CounterField::from_str("materials_viewed").unwrap(),
            CounterField::MaterialsViewed
        );
    }

    #[test]
    fn access_context_constructors() {
        let free = AccessContext::free();
        assert_eq!(free.decision, AccessDecision::Allow);
        assert!(!free.requires_subscription);

        let denied = AccessContext::gated(AccessDecision::Deny);
        assert_eq!(denied.class, ActionClass::Gated);
        assert!(denied.requires_subscription);

        let allowed = AccessContext::gated(AccessDecision::Allow);
        assert!(!allowed.requires_subscription);
    }

    #[test]
    fn actor_includes_username_when_present() {
        let event = Event {
            user_id: 7,
            kind: EventKind::Callback,
            action: "menu".to_string(),
            username: Some("ann".to_string()),
            first_name: None,
            last_name: None,
            text: None,
            chat_id: 7,
            callback_id: None,
        };
        assert_eq!(event.actor(), "7 (@ann)");
    }
}
