// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`UserStore`] for deterministic testing.
//!
//! Backed by a HashMap behind a tokio Mutex, with failure injection for
//! exercising the fail-closed paths and a read counter for asserting that
//! free actions never consult the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use soma_core::{
    CounterField, SomaError, UserId, UserPatch, UserProfile, UserRecord, UserStore,
};

/// A fake user store holding records in memory.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<UserId, UserRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a record directly into the store, bypassing `create_user`.
    pub async fn seed(&self, record: UserRecord) {
        self.users.lock().await.insert(record.id, record);
    }

    /// Fetch a record directly, bypassing the trait (and the read
    /// counter).
    pub async fn get(&self, id: UserId) -> Option<UserRecord> {
        self.users.lock().await.get(&id).cloned()
    }

    /// When set, every read operation fails with a store error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// When set, every write operation fails with a store error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `get_user` calls made through the trait.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn outage() -> SomaError {
        SomaError::Store {
            source: "injected store outage".into(),
        }
    }

    fn check_read(&self) -> Result<(), SomaError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(Self::outage())
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> Result<(), SomaError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(Self::outage())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_user(&self, id: UserId) -> Result<Option<UserRecord>, SomaError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn create_user(&self, id: UserId, profile: UserProfile) -> Result<bool, SomaError> {
        self.check_write()?;
        let mut users = self.users.lock().await;
        users
            .entry(id)
            .or_insert_with(|| UserRecord::new(id, profile, Utc::now()));
        Ok(true)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<bool, SomaError> {
        self.check_write()?;
        let mut users = self.users.lock().await;
        match users.get_mut(&id) {
            Some(record) => {
                patch.apply(record);
                record.last_activity = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_counter(&self, id: UserId, field: CounterField) -> Result<bool, SomaError> {
        self.check_write()?;
        let mut users = self.users.lock().await;
        match users.get_mut(&id) {
            Some(record) => {
                match field {
                    CounterField::MaterialsViewed => record.materials_viewed += 1,
                    CounterField::ConsultationRequests => record.consultation_requests += 1,
                }
                record.last_activity = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_problem(&self, id: UserId, label: &str) -> Result<bool, SomaError> {
        self.check_write()?;
        let mut users = self.users.lock().await;
        match users.get_mut(&id) {
            Some(record) => {
                if !record.problems_selected.iter().any(|p| p == label) {
                    record.problems_selected.push(label.to_string());
                }
                record.last_activity = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_subscription(&self, id: UserId, days: i64) -> Result<bool, SomaError> {
        self.check_write()?;
        let now = Utc::now();
        let mut users = self.users.lock().await;
        match users.get_mut(&id) {
            Some(record) => {
                record.payment_active = true;
                record.status = "subscribed".to_string();
                record.subscription_start = Some(now);
                record.subscription_end = Some(now + chrono::Duration::days(days));
                record.last_activity = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, SomaError> {
        self.check_read()?;
        let users = self.users.lock().await;
        let mut all: Vec<UserRecord> = users.values().cloned().collect();
        all.sort_by_key(|record| (record.registered_at, record.id));
        Ok(all)
    }
}
