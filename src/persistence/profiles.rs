//! Profile store
//!
//! Owns rich profile documents keyed by the identity's public identifier.
//! Every persist recomputes the completeness score from the current field
//! values, so a stored profile can never carry a stale score.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use utoipa::ToSchema;

use crate::completeness;
use crate::error::Result;
use crate::persistence::users::parse_timestamp;

/// Default country calling code for new profiles
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// The fixed set of six social-media fields
///
/// Sub-fields default to the empty string when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialMedia {
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub twitter: String,
}

/// A profile document
///
/// Field names follow the legacy wire format. `profileCompleteness` is a
/// derived value and is never accepted as input.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileRecord {
    /// Owning identity's public identifier
    pub user_id: String,
    pub name: String,
    /// Display email, independent of the identity's login email
    pub email: String,
    #[serde(rename = "profilePhoto")]
    pub profile_photo: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<NaiveDate>,
    /// `Male`, `Female`, `Other`, or `""` for unset
    pub gender: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub about: String,
    #[serde(rename = "socialMedia")]
    pub social_media: SocialMedia,
    /// Derived 0-100 score over the fixed completeness field set
    #[serde(rename = "profileCompleteness")]
    pub completeness: i64,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// A brand-new profile seeded from the owning identity
    ///
    /// Name defaults to the email local-part, display email to the identity
    /// email, visibility to public.
    pub fn seeded(user_id: &str, identity_email: &str, now: DateTime<Utc>) -> Self {
        let name = identity_email
            .split('@')
            .next()
            .unwrap_or(identity_email)
            .to_string();

        Self {
            user_id: user_id.to_string(),
            name,
            email: identity_email.to_string(),
            profile_photo: None,
            date_of_birth: None,
            gender: String::new(),
            phone_number: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            about: String::new(),
            social_media: SocialMedia::default(),
            completeness: 0,
            is_public: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile store over the `profiles` table
#[derive(Debug, Clone)]
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a profile by its owner's public identifier
    pub async fn find(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        let row = sqlx::query(
            "SELECT user_id, name, email, profile_photo, date_of_birth, gender,
                    phone_number, country_code, about, social_media, completeness,
                    is_public, created_at, updated_at
             FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_profile).transpose()
    }

    /// Persist a profile, inserting or replacing by owner
    ///
    /// The completeness score and `updated_at` are recomputed as part of the
    /// same persist; `created_at` of an existing row is preserved.
    pub async fn persist(&self, mut record: ProfileRecord) -> Result<ProfileRecord> {
        record.completeness = completeness::score(&record);
        record.updated_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id, name, email, profile_photo, date_of_birth, gender,
                phone_number, country_code, about, social_media, completeness,
                is_public, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                profile_photo = excluded.profile_photo,
                date_of_birth = excluded.date_of_birth,
                gender = excluded.gender,
                phone_number = excluded.phone_number,
                country_code = excluded.country_code,
                about = excluded.about,
                social_media = excluded.social_media,
                completeness = excluded.completeness,
                is_public = excluded.is_public,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.profile_photo)
        .bind(record.date_of_birth.map(|d| d.to_string()))
        .bind(&record.gender)
        .bind(&record.phone_number)
        .bind(&record.country_code)
        .bind(&record.about)
        .bind(serde_json::to_string(&record.social_media)?)
        .bind(record.completeness)
        .bind(record.is_public as i64)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// All public profiles, newest first
    pub async fn list_public(&self) -> Result<Vec<ProfileRecord>> {
        let rows = sqlx::query(
            "SELECT user_id, name, email, profile_photo, date_of_birth, gender,
                    phone_number, country_code, about, social_media, completeness,
                    is_public, created_at, updated_at
             FROM profiles WHERE is_public = 1
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_profile).collect()
    }
}

fn row_to_profile(row: SqliteRow) -> Result<ProfileRecord> {
    let social_raw: String = row.try_get("social_media")?;
    let date_raw: Option<String> = row.try_get("date_of_birth")?;

    Ok(ProfileRecord {
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        profile_photo: row.try_get("profile_photo")?,
        date_of_birth: date_raw.and_then(|d| d.parse().ok()),
        gender: row.try_get("gender")?,
        phone_number: row.try_get("phone_number")?,
        country_code: row.try_get("country_code")?,
        about: row.try_get("about")?,
        social_media: serde_json::from_str(&social_raw)?,
        completeness: row.try_get("completeness")?,
        is_public: row.try_get::<i64, _>("is_public")? != 0,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_profile_defaults() {
        let now = Utc::now();
        let profile = ProfileRecord::seeded("USER000001", "jane.doe@example.com", now);

        assert_eq!(profile.name, "jane.doe");
        assert_eq!(profile.email, "jane.doe@example.com");
        assert_eq!(profile.country_code, "+91");
        assert!(profile.is_public);
        assert_eq!(profile.social_media, SocialMedia::default());
    }

    #[test]
    fn test_wire_field_names() {
        let profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        let json = serde_json::to_value(&profile).unwrap();

        assert!(json.get("profileCompleteness").is_some());
        assert!(json.get("socialMedia").is_some());
        assert!(json.get("isPublic").is_some());
        assert_eq!(json["countryCode"], "+91");
    }
}
