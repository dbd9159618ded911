//! Identity flows: signup, authentication, lookup

use tracing::{debug, info};

use crate::credentials;
use crate::error::{Error, Result};
use crate::persistence::{sequences, SequenceAllocator, UserRecord, UserStore, USER_ID_COUNTER};

/// Identity service
#[derive(Debug, Clone)]
pub struct IdentityService {
    users: UserStore,
    sequences: SequenceAllocator,
}

impl IdentityService {
    pub fn new(users: UserStore, sequences: SequenceAllocator) -> Self {
        Self { users, sequences }
    }

    /// Create a new identity
    ///
    /// The public identifier is allocated atomically before the write; email
    /// uniqueness is left to the store constraint so concurrent signups for
    /// the same email cannot both succeed. A failed write never leaves a
    /// partial identity behind.
    pub async fn signup(&self, email: &str, raw_password: &str) -> Result<UserRecord> {
        let password_hash = credentials::hash_password(raw_password)?;

        let seq = self.sequences.next(USER_ID_COUNTER).await?;
        let public_id = sequences::format_public_id(seq);

        let user = self.users.create(&public_id, email, &password_hash).await?;
        info!(user_id = %user.user_id, "new identity registered");

        Ok(user)
    }

    /// Authenticate by email and password
    ///
    /// An unknown email and a wrong password produce the same error; only a
    /// deactivated account is reported distinctly, and only after the email
    /// resolved to a record.
    pub async fn login(&self, email: &str, raw_password: &str) -> Result<UserRecord> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !user.is_active {
            debug!(user_id = %user.user_id, "login attempt on deactivated account");
            return Err(Error::AccountDisabled);
        }

        if !credentials::verify_password(raw_password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        info!(user_id = %user.user_id, "login successful");
        Ok(user)
    }

    /// Look up an identity by public identifier, failing if absent
    pub async fn require(&self, public_id: &str) -> Result<UserRecord> {
        self.users
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| Error::not_found("User"))
    }
}
