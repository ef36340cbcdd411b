// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User record CRUD operations.

use chrono::{DateTime, Utc};
use rusqlite::{Row, params};
use soma_core::{CounterField, SomaError, UserId, UserPatch, UserProfile, UserRecord};

use crate::database::{Database, map_tr_err};

const USER_COLUMNS: &str = "id, username, first_name, last_name, phone, status, payment_active, \
     subscription_start, subscription_end, registered_at, last_activity, \
     materials_viewed, consultation_requests, problems_selected, notes";

fn row_to_record(row: &Row<'_>) -> Result<UserRecord, rusqlite::Error> {
    let problems_json: String = row.get(13)?;
    let problems_selected = serde_json::from_str(&problems_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(13, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(UserRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        status: row.get(5)?,
        payment_active: row.get(6)?,
        subscription_start: row.get(7)?,
        subscription_end: row.get(8)?,
        registered_at: row.get(9)?,
        last_activity: row.get(10)?,
        materials_viewed: row.get(11)?,
        consultation_requests: row.get(12)?,
        problems_selected,
        notes: row.get(14)?,
    })
}

/// Fetch a record by id.
pub async fn get_user(db: &Database, id: UserId) -> Result<Option<UserRecord>, SomaError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], row_to_record);
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a fresh record unless the id already exists.
///
/// Returns whether a row was inserted; an existing id is not an error.
pub async fn create_user(
    db: &Database,
    id: UserId,
    profile: UserProfile,
    now: DateTime<Utc>,
) -> Result<bool, SomaError> {
    db.connection()
        .call(move |conn| {
            let record = UserRecord::new(id, profile, now);
            let inserted = conn.execute(
                "INSERT INTO users (id, username, first_name, last_name, phone, status, \
                 payment_active, registered_at, last_activity, problems_selected, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, '[]', '') \
                 ON CONFLICT (id) DO NOTHING",
                params![
                    record.id,
                    record.username,
                    record.first_name,
                    record.last_name,
                    record.phone,
                    record.status,
                    record.payment_active,
                    record.registered_at,
                    record.last_activity,
                ],
            )?;
            Ok(inserted > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a partial update and touch `last_activity`.
///
/// The read-modify-write runs inside one closure on the single writer
/// thread, so it is atomic with respect to other store calls.
pub async fn update_user(
    db: &Database,
    id: UserId,
    patch: UserPatch,
    now: DateTime<Utc>,
) -> Result<bool, SomaError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
            let mut record = match stmt.query_row(params![id], row_to_record) {
                Ok(record) => record,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
                Err(e) => return Err(e.into()),
            };
            patch.apply(&mut record);

            conn.execute(
                "UPDATE users SET status = ?1, payment_active = ?2, subscription_start = ?3, \
                 subscription_end = ?4, phone = ?5, notes = ?6, last_activity = ?7 WHERE id = ?8",
                params![
                    record.status,
                    record.payment_active,
                    record.subscription_start,
                    record.subscription_end,
                    record.phone,
                    record.notes,
                    now,
                    id,
                ],
            )?;
            Ok(true)
        })
        .await
        .map_err(map_tr_err)
}

/// Increase a monotonic counter by exactly 1 and touch `last_activity`.
pub async fn increment_counter(
    db: &Database,
    id: UserId,
    field: CounterField,
    now: DateTime<Utc>,
) -> Result<bool, SomaError> {
    db.connection()
        .call(move |conn| {
            // The column name comes from the enum, never from input.
            let column = field.to_string();
            let updated = conn.execute(
                &format!(
                    "UPDATE users SET {column} = {column} + 1, last_activity = ?1 WHERE id = ?2"
                ),
                params![now, id],
            )?;
            Ok(updated > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Append a problem label, de-duplicated and insertion-ordered.
pub async fn add_problem(
    db: &Database,
    id: UserId,
    label: String,
    now: DateTime<Utc>,
) -> Result<bool, SomaError> {
    db.connection()
        .call(move |conn| {
            let problems_json: String = match conn.query_row(
                "SELECT problems_selected FROM users WHERE id = ?1",
                params![id],
                |row| row.get(0),
            ) {
                Ok(json) => json,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
                Err(e) => return Err(e.into()),
            };
            let mut problems: Vec<String> = serde_json::from_str(&problems_json)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            if !problems.iter().any(|p| p == &label) {
                problems.push(label);
            }
            let serialized = serde_json::to_string(&problems)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            conn.execute(
                "UPDATE users SET problems_selected = ?1, last_activity = ?2 WHERE id = ?3",
                params![serialized, now, id],
            )?;
            Ok(true)
        })
        .await
        .map_err(map_tr_err)
}

/// Activate a subscription window of `days` starting at `now`.
pub async fn set_subscription(
    db: &Database,
    id: UserId,
    days: i64,
    now: DateTime<Utc>,
) -> Result<bool, SomaError> {
    let end = now + chrono::Duration::days(days);
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE users SET payment_active = 1, status = 'subscribed', \
                 subscription_start = ?1, subscription_end = ?2, last_activity = ?3 WHERE id = ?4",
                params![now, end, now, id],
            )?;
            Ok(updated > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// All records, oldest registration first. Reporting only.
pub async fn list_users(db: &Database) -> Result<Vec<UserRecord>, SomaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY registered_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map([], row_to_record)?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(map_tr_err)
}
