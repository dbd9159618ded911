//! SQLite persistence layer
//!
//! Four small stores over one pool: sequence counters, identities, profiles
//! and support tickets. Uniqueness invariants (email, public identifier) are
//! enforced by the store's UNIQUE constraints rather than pre-checks, so
//! concurrent creates for the same key fail instead of duplicating.

pub mod profiles;
pub mod sequences;
pub mod support;
pub mod users;

pub use profiles::{ProfileRecord, ProfileStore, SocialMedia};
pub use sequences::{SequenceAllocator, USER_ID_COUNTER};
pub use support::{NewTicket, SupportStore, SupportTicket, TicketStatus};
pub use users::{UserRecord, UserStore};

use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Database handle owning the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database, creating it if missing, and run migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if !Sqlite::database_exists(&config.url).await.unwrap_or(false) {
            info!("Creating new SQLite database: {}", config.url);
            Sqlite::create_database(&config.url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        info!("SQLite connection established");

        let db = Self { pool };
        db.apply_pragmas().await?;

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Get access to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Sequence allocator bound to this database
    pub fn sequences(&self) -> SequenceAllocator {
        SequenceAllocator::new(self.pool.clone())
    }

    /// Identity store bound to this database
    pub fn users(&self) -> UserStore {
        UserStore::new(self.pool.clone())
    }

    /// Profile store bound to this database
    pub fn profiles(&self) -> ProfileStore {
        ProfileStore::new(self.pool.clone())
    }

    /// Support ticket store bound to this database
    pub fn support(&self) -> SupportStore {
        SupportStore::new(self.pool.clone())
    }

    async fn apply_pragmas(&self) -> Result<()> {
        // WAL for concurrent readers, foreign keys for linkage integrity
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&self.pool)
            .await?;
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout = 30000")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Run schema migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS counters (
                name TEXT PRIMARY KEY,
                seq INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                profile_photo TEXT,
                date_of_birth TEXT,
                gender TEXT NOT NULL DEFAULT '',
                phone_number TEXT NOT NULL DEFAULT '',
                country_code TEXT NOT NULL DEFAULT '+91',
                about TEXT NOT NULL DEFAULT '',
                social_media TEXT NOT NULL DEFAULT '{}',
                completeness INTEGER NOT NULL DEFAULT 0,
                is_public INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (user_id)
            );

            CREATE TABLE IF NOT EXISTS support_requests (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                email TEXT NOT NULL,
                subject TEXT NOT NULL,
                description TEXT NOT NULL,
                screenshot TEXT,
                contact_number TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (user_id)
            );

            CREATE INDEX IF NOT EXISTS idx_support_requests_user_id
                ON support_requests (user_id);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
