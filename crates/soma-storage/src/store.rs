// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`UserStore`] trait.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::debug;

use soma_config::model::StorageConfig;
use soma_core::{CounterField, SomaError, UserId, UserPatch, UserProfile, UserRecord, UserStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed user store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is opened lazily on the first call to
/// [`SqliteUserStore::initialize`].
pub struct SqliteUserStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteUserStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is
    /// called.
    ///
    /// [`initialize`]: SqliteUserStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database, apply PRAGMAs, and run migrations.
    pub async fn initialize(&self) -> Result<(), SomaError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SomaError::Store {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite user store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), SomaError> {
        self.db()?.close().await
    }

    fn db(&self) -> Result<&Database, SomaError> {
        self.db.get().ok_or_else(|| SomaError::Store {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get_user(&self, id: UserId) -> Result<Option<UserRecord>, SomaError> {
        queries::users::get_user(self.db()?, id).await
    }

    async fn create_user(&self, id: UserId, profile: UserProfile) -> Result<bool, SomaError> {
        let inserted = queries::users::create_user(self.db()?, id, profile, Utc::now()).await?;
        if !inserted {
            debug!(user_id = id, "user already registered");
        }
        Ok(true)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<bool, SomaError> {
        queries::users::update_user(self.db()?, id, patch, Utc::now()).await
    }

    async fn increment_counter(&self, id: UserId, field: CounterField) -> Result<bool, SomaError> {
        queries::users::increment_counter(self.db()?, id, field, Utc::now()).await
    }

    async fn add_problem(&self, id: UserId, label: &str) -> Result<bool, SomaError> {
        queries::users::add_problem(self.db()?, id, label.to_string(), Utc::now()).await
    }

    async fn set_subscription(&self, id: UserId, days: i64) -> Result<bool, SomaError> {
        queries::users::set_subscription(self.db()?, id, days, Utc::now()).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, SomaError> {
        queries::users::list_users(self.db()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
            timeout_ms: 5000,
        }
    }

    #[tokio::test]
    async fn calls_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("uninit.db");
        let store = SqliteUserStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.get_user(1).await.is_err());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double.db");
        let store = SqliteUserStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn create_reports_success_for_existing_user() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("idem.db");
        let store = SqliteUserStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        assert!(store.create_user(42, UserProfile::default()).await.unwrap());
        // Idempotent: the trait reports success either way.
        assert!(store.create_user(42, UserProfile::default()).await.unwrap());
        assert_eq!(store.list_users().await.unwrap().len(), 1);

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_lifecycle_through_trait() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let store = SqliteUserStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        store
            .create_user(
                10,
                UserProfile {
                    username: Some("ann".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        store
            .increment_counter(10, CounterField::MaterialsViewed)
            .await
            .unwrap();
        store.add_problem(10, "sleep").await.unwrap();
        store.set_subscription(10, 30).await.unwrap();

        let record = store.get_user(10).await.unwrap().unwrap();
        assert_eq!(record.materials_viewed, 1);
        assert_eq!(record.problems_selected, vec!["sleep"]);
        assert!(record.payment_active);
        assert!(record.subscription_end.unwrap() > Utc::now());

        store.close().await.unwrap();
    }
}
