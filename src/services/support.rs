//! Support ticket flows

use tracing::info;

use crate::error::{Error, Result};
use crate::persistence::{NewTicket, SupportStore, SupportTicket};
use crate::services::IdentityService;

/// Fields accepted for a new ticket, before identity linkage
#[derive(Debug, Clone)]
pub struct TicketRequest {
    pub user_id: String,
    /// Defaults to the identity's email when absent
    pub email: Option<String>,
    pub subject: String,
    pub description: String,
    pub screenshot: Option<String>,
    pub contact_number: String,
}

/// Support ticket service
#[derive(Debug, Clone)]
pub struct SupportService {
    identities: IdentityService,
    tickets: SupportStore,
}

impl SupportService {
    pub fn new(identities: IdentityService, tickets: SupportStore) -> Self {
        Self {
            identities,
            tickets,
        }
    }

    /// Open a ticket for an existing identity
    pub async fn create(&self, request: TicketRequest) -> Result<SupportTicket> {
        let user = self.identities.require(&request.user_id).await?;

        let email = match request.email {
            Some(email) if !email.is_empty() => email,
            _ => user.email.clone(),
        };

        let ticket = self
            .tickets
            .insert(NewTicket {
                user_id: user.user_id,
                email,
                subject: request.subject,
                description: request.description,
                screenshot: request.screenshot,
                contact_number: request.contact_number,
            })
            .await?;

        info!(ticket_id = %ticket.id, "support ticket opened");
        Ok(ticket)
    }

    /// All tickets, newest first
    pub async fn list_all(&self) -> Result<Vec<SupportTicket>> {
        self.tickets.list_all().await
    }

    /// One ticket by id, failing if absent
    pub async fn get(&self, id: &str) -> Result<SupportTicket> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Support request"))
    }

    /// Tickets of one identity, failing if the identity is absent
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<SupportTicket>> {
        self.identities.require(user_id).await?;
        self.tickets.list_by_user(user_id).await
    }
}
