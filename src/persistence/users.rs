//! Identity store
//!
//! Owns account records: credentials, activation state and the public
//! identifier. Email uniqueness is enforced by the store constraint, not a
//! pre-check, so a concurrent signup race resolves to exactly one record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::error::{Error, Result};

/// An account record
///
/// The password hash is deliberately excluded from serialization; no outward
/// representation of an identity ever carries the credential.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    /// Store-assigned opaque key
    pub id: i64,
    /// Public identifier, `USER` + 6-digit sequence number
    pub user_id: String,
    /// Unique email, stored lowercase
    pub email: String,
    /// Argon2 credential hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Activation flag
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Identity store over the `users` table
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Normalize an email the way it is stored: trimmed and lowercased
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Persist a new identity
    ///
    /// A violated uniqueness constraint surfaces as a duplicate-key error
    /// after the attempted write; the allocated public identifier is not
    /// reclaimed on failure.
    pub async fn create(
        &self,
        public_id: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord> {
        let email = Self::normalize_email(email);
        let now = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO users (user_id, email, password_hash, is_active, created_at, updated_at)
            VALUES (?, ?, ?, 1, ?, ?)
            RETURNING id
            "#,
        )
        .bind(public_id)
        .bind(&email)
        .bind(password_hash)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "users.email", "Email"))?;

        let id: i64 = row.try_get("id").map_err(Error::Database)?;
        debug!(user_id = %public_id, "identity created");

        Ok(UserRecord {
            id,
            user_id: public_id.to_string(),
            email,
            password_hash: password_hash.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up an identity by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, user_id, email, password_hash, is_active, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(Self::normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_user).transpose()
    }

    /// Look up an identity by public identifier
    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, user_id, email, password_hash, is_active, created_at, updated_at
             FROM users WHERE user_id = ?",
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_user).transpose()
    }
}

/// Translate a storage uniqueness violation into a duplicate-key error
fn map_unique_violation(err: sqlx::Error, column: &str, field: &str) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() && db_err.message().contains(column) {
            return Error::Duplicate {
                field: field.to_string(),
            };
        }
    }
    Error::Database(err)
}

fn row_to_user(row: SqliteRow) -> Result<UserRecord> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        is_active: row.try_get::<i64, _>("is_active")? != 0,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

pub(crate) fn parse_timestamp(raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal {
            message: format!("Malformed timestamp in store: {e}"),
        })
}
