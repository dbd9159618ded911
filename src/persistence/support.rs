//! Support ticket store
//!
//! Append-only: tickets are created and read, never merged or mutated by
//! this API. Every ticket references an existing identity at creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Result;
use crate::persistence::users::parse_timestamp;

/// Ticket lifecycle state; transitions are not exposed by this API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "in-progress" => TicketStatus::InProgress,
            "resolved" => TicketStatus::Resolved,
            "closed" => TicketStatus::Closed,
            _ => TicketStatus::Pending,
        }
    }
}

/// A support request record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupportTicket {
    pub id: String,
    /// Owning identity's public identifier
    pub user_id: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub screenshot: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    pub status: TicketStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when opening a ticket
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub user_id: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub screenshot: Option<String>,
    pub contact_number: String,
}

/// Support ticket store over the `support_requests` table
#[derive(Debug, Clone)]
pub struct SupportStore {
    pool: SqlitePool,
}

impl SupportStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new ticket with a fresh id and pending status
    pub async fn insert(&self, fields: NewTicket) -> Result<SupportTicket> {
        let now = Utc::now();
        let ticket = SupportTicket {
            id: Uuid::new_v4().to_string(),
            user_id: fields.user_id,
            email: fields.email,
            subject: fields.subject,
            description: fields.description,
            screenshot: fields.screenshot,
            contact_number: fields.contact_number,
            status: TicketStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO support_requests (
                id, user_id, email, subject, description, screenshot,
                contact_number, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&ticket.id)
        .bind(&ticket.user_id)
        .bind(&ticket.email)
        .bind(&ticket.subject)
        .bind(&ticket.description)
        .bind(&ticket.screenshot)
        .bind(&ticket.contact_number)
        .bind(ticket.status.as_str())
        .bind(ticket.created_at.to_rfc3339())
        .bind(ticket.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(ticket_id = %ticket.id, user_id = %ticket.user_id, "support ticket created");
        Ok(ticket)
    }

    /// All tickets, newest first
    pub async fn list_all(&self) -> Result<Vec<SupportTicket>> {
        let rows = sqlx::query(&select_query("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(row_to_ticket).collect()
    }

    /// Look up a single ticket by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<SupportTicket>> {
        let row = sqlx::query(&select_query("WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_ticket).transpose()
    }

    /// All tickets of one identity, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<SupportTicket>> {
        let rows = sqlx::query(&select_query("WHERE user_id = ? ORDER BY created_at DESC"))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(row_to_ticket).collect()
    }
}

fn select_query(suffix: &str) -> String {
    format!(
        "SELECT id, user_id, email, subject, description, screenshot,
                contact_number, status, created_at, updated_at
         FROM support_requests {suffix}"
    )
}

fn row_to_ticket(row: SqliteRow) -> Result<SupportTicket> {
    let status_raw: String = row.try_get("status")?;

    Ok(SupportTicket {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        email: row.try_get("email")?,
        subject: row.try_get("subject")?,
        description: row.try_get("description")?,
        screenshot: row.try_get("screenshot")?,
        contact_number: row.try_get("contact_number")?,
        status: TicketStatus::parse(&status_raw),
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(TicketStatus::parse("resolved"), TicketStatus::Resolved);
        assert_eq!(TicketStatus::parse("unknown"), TicketStatus::Pending);
    }
}
