//! Profile flows: lazy creation, merge-based upsert, photo handling,
//! share view and public listing

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::merge::{self, ProfileUpdate};
use crate::persistence::{ProfileRecord, ProfileStore};
use crate::services::IdentityService;

/// Profile service
#[derive(Debug, Clone)]
pub struct ProfileService {
    identities: IdentityService,
    profiles: ProfileStore,
}

impl ProfileService {
    pub fn new(identities: IdentityService, profiles: ProfileStore) -> Self {
        Self {
            identities,
            profiles,
        }
    }

    /// Fetch a profile, creating and persisting the identity-seeded default
    /// if none exists yet
    ///
    /// The create-on-read is explicit in this operation's name; plain reads
    /// go through the store directly.
    pub async fn get_or_create_default(&self, user_id: &str) -> Result<ProfileRecord> {
        let user = self.identities.require(user_id).await?;

        if let Some(profile) = self.profiles.find(user_id).await? {
            return Ok(profile);
        }

        debug!(user_id = %user_id, "creating default profile on first read");
        let seeded = ProfileRecord::seeded(&user.user_id, &user.email, Utc::now());
        self.profiles.persist(seeded).await
    }

    /// Merge a partial payload into the profile and persist the result
    ///
    /// Returns the stored profile and whether it was newly created. Fails
    /// with not-found before any write when the identity does not exist.
    pub async fn upsert(
        &self,
        user_id: &str,
        payload: &ProfileUpdate,
    ) -> Result<(ProfileRecord, bool)> {
        let user = self.identities.require(user_id).await?;

        let existing = self.profiles.find(user_id).await?;
        let created = existing.is_none();

        let merged = merge::merge(existing, payload, &user.user_id, &user.email, Utc::now());
        let stored = self.profiles.persist(merged).await?;

        info!(user_id = %user_id, created, completeness = stored.completeness, "profile upserted");
        Ok((stored, created))
    }

    /// Set the profile photo, creating a default profile first if needed
    pub async fn set_photo(&self, user_id: &str, photo_url: String) -> Result<ProfileRecord> {
        let user = self.identities.require(user_id).await?;

        let mut profile = match self.profiles.find(user_id).await? {
            Some(profile) => profile,
            None => ProfileRecord::seeded(&user.user_id, &user.email, Utc::now()),
        };

        profile.profile_photo = Some(photo_url);
        self.profiles.persist(profile).await
    }

    /// Clear the profile photo; requires an existing profile
    pub async fn clear_photo(&self, user_id: &str) -> Result<ProfileRecord> {
        let mut profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or_else(|| Error::not_found("Profile"))?;

        profile.profile_photo = None;
        self.profiles.persist(profile).await
    }

    /// Fetch a profile for sharing; private profiles are forbidden
    pub async fn shareable(&self, user_id: &str) -> Result<ProfileRecord> {
        let profile = self
            .profiles
            .find(user_id)
            .await?
            .ok_or_else(|| Error::not_found("Profile"))?;

        if !profile.is_public {
            return Err(Error::Forbidden {
                message: "This profile is private and cannot be shared".to_string(),
            });
        }

        Ok(profile)
    }

    /// All public profiles, newest first
    pub async fn list_public(&self) -> Result<Vec<ProfileRecord>> {
        self.profiles.list_public().await
    }
}
