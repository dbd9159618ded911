//! Profile merge engine
//!
//! A pure function computing the next profile state from an existing profile
//! (or its absence) and a partial update payload. The critical rule is the
//! split between two field groups:
//!
//! - **Scalar fields** (name, email, dateOfBirth, countryCode): an incoming
//!   value wins only when it is supplied and non-empty; anything else keeps
//!   the prior value.
//! - **Nullable-clearable fields** (profilePhoto, gender, phoneNumber,
//!   about, each socialMedia sub-field): supplying the key at all wins, so
//!   an explicit null or empty string clears the field while an omitted key
//!   keeps it.
//!
//! [`Patch`] makes the three-way distinction (absent / null / value) explicit
//! in the payload type instead of relying on truthiness.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::completeness;
use crate::persistence::{ProfileRecord, SocialMedia};

/// Three-way presence wrapper for a partial-update field
///
/// `Absent` means the key was omitted, `Null` that it was supplied as JSON
/// null, `Value` that a concrete value was supplied. Deserialization only
/// runs when the key is present, so `#[serde(default)]` yields `Absent` for
/// omitted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The supplied value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

impl Patch<String> {
    /// Resolve against the prior value under the nullable-clearable rule:
    /// omitted keeps, null/value replaces (null clears to empty)
    fn apply(&self, prior: &str) -> String {
        match self {
            Patch::Absent => prior.to_string(),
            Patch::Null => String::new(),
            Patch::Value(v) => v.clone(),
        }
    }
}

/// Partial social-media payload; sub-fields merge independently
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SocialMediaUpdate {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub linkedin: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub website: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub instagram: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub youtube: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub github: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub twitter: Patch<String>,
}

/// Partial profile payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, rename = "profilePhoto")]
    #[schema(value_type = Option<String>)]
    pub profile_photo: Patch<String>,
    /// ISO `YYYY-MM-DD`; validated by the rule set before merging
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub gender: Patch<String>,
    #[serde(default, rename = "phoneNumber")]
    #[schema(value_type = Option<String>)]
    pub phone_number: Patch<String>,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub about: Patch<String>,
    #[serde(rename = "socialMedia")]
    pub social_media: Option<SocialMediaUpdate>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<bool>,
}

/// Compute the next profile state
///
/// With no existing profile, every field starts from the identity-derived
/// default before payload values are layered on top. The result always
/// carries a freshly computed completeness score. No side effects; safe to
/// apply speculatively.
pub fn merge(
    existing: Option<ProfileRecord>,
    payload: &ProfileUpdate,
    user_id: &str,
    identity_email: &str,
    now: DateTime<Utc>,
) -> ProfileRecord {
    let mut next =
        existing.unwrap_or_else(|| ProfileRecord::seeded(user_id, identity_email, now));

    // Scalar group: non-empty incoming values replace, everything else keeps.
    if let Some(name) = non_empty(&payload.name) {
        next.name = name.to_string();
    }
    if let Some(email) = non_empty(&payload.email) {
        next.email = email.to_string();
    }
    if let Some(date) = non_empty(&payload.date_of_birth).and_then(parse_date) {
        next.date_of_birth = Some(date);
    }
    if let Some(code) = non_empty(&payload.country_code) {
        next.country_code = code.to_string();
    }

    // Nullable-clearable group: any supplied key replaces, null clears.
    next.profile_photo = match &payload.profile_photo {
        Patch::Absent => next.profile_photo,
        Patch::Null => None,
        Patch::Value(v) => Some(v.clone()),
    };
    next.gender = payload.gender.apply(&next.gender);
    next.phone_number = payload.phone_number.apply(&next.phone_number);
    next.about = payload.about.apply(&next.about);

    // Composite: sub-fields merge independently under the clearable rule.
    if let Some(social) = &payload.social_media {
        next.social_media = SocialMedia {
            linkedin: social.linkedin.apply(&next.social_media.linkedin),
            website: social.website.apply(&next.social_media.website),
            instagram: social.instagram.apply(&next.social_media.instagram),
            youtube: social.youtube.apply(&next.social_media.youtube),
            github: social.github.apply(&next.social_media.github),
            twitter: social.twitter.apply(&next.social_media.twitter),
        };
    }

    if let Some(is_public) = payload.is_public {
        next.is_public = is_public;
    }

    next.completeness = completeness::score(&next);
    next
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> ProfileUpdate {
        serde_json::from_str(json).unwrap()
    }

    fn fresh(payload_json: &str) -> ProfileRecord {
        merge(
            None,
            &payload(payload_json),
            "USER000001",
            "a@x.com",
            Utc::now(),
        )
    }

    #[test]
    fn test_patch_deserialization_three_ways() {
        let update = payload(r#"{"about": "hi"}"#);
        assert_eq!(update.about, Patch::Value("hi".to_string()));
        assert!(update.gender.is_absent());

        let update = payload(r#"{"gender": null}"#);
        assert_eq!(update.gender, Patch::Null);
    }

    #[test]
    fn test_fresh_profile_uses_identity_defaults() {
        let profile = fresh("{}");
        assert_eq!(profile.name, "a");
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.country_code, "+91");
        assert!(profile.is_public);
    }

    #[test]
    fn test_scalar_empty_string_keeps_prior() {
        let existing = fresh(r#"{"name": "Jane"}"#);
        let next = merge(
            Some(existing),
            &payload(r#"{"name": ""}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        assert_eq!(next.name, "Jane");
    }

    #[test]
    fn test_omitted_clearable_field_is_kept() {
        let existing = fresh(r#"{"about": "hello", "phoneNumber": "9876543210"}"#);
        let next = merge(
            Some(existing),
            &payload(r#"{"name": "Jane"}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        assert_eq!(next.about, "hello");
        assert_eq!(next.phone_number, "9876543210");
    }

    #[test]
    fn test_explicit_empty_clears_clearable_field() {
        let existing = fresh(r#"{"about": "hello"}"#);
        let next = merge(
            Some(existing),
            &payload(r#"{"about": ""}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        assert_eq!(next.about, "");
    }

    #[test]
    fn test_explicit_null_clears_photo() {
        let existing = fresh(r#"{"profilePhoto": "/uploads/me.png"}"#);
        let next = merge(
            Some(existing),
            &payload(r#"{"profilePhoto": null}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        assert_eq!(next.profile_photo, None);
    }

    #[test]
    fn test_clearable_merge_is_idempotent() {
        let existing = fresh(r#"{"about": "hello", "gender": "Male"}"#);
        let clear = payload(r#"{"about": "", "gender": null}"#);

        let once = merge(
            Some(existing.clone()),
            &clear,
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        let twice = merge(
            Some(once.clone()),
            &clear,
            "USER000001",
            "a@x.com",
            Utc::now(),
        );

        assert_eq!(once.about, twice.about);
        assert_eq!(once.gender, twice.gender);
        assert_eq!(once.completeness, twice.completeness);
    }

    #[test]
    fn test_social_subfields_merge_independently() {
        let existing = fresh(r#"{"socialMedia": {"github": "octocat", "twitter": "@octocat"}}"#);
        let next = merge(
            Some(existing),
            &payload(r#"{"socialMedia": {"twitter": null, "linkedin": "jane"}}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );

        assert_eq!(next.social_media.github, "octocat");
        assert_eq!(next.social_media.twitter, "");
        assert_eq!(next.social_media.linkedin, "jane");
    }

    #[test]
    fn test_first_partial_update_scores_seeded_fields() {
        let profile = fresh(r#"{"about": "hi", "socialMedia": {"github": "octocat"}}"#);

        assert_eq!(profile.about, "hi");
        assert_eq!(profile.social_media.github, "octocat");
        assert_eq!(profile.social_media.linkedin, "");
        assert_eq!(profile.social_media.website, "");
        // name + email (seeded) + about are filled; github is outside the
        // nine-field completeness set.
        assert_eq!(profile.completeness, 33);
    }

    #[test]
    fn test_visibility_replaced_only_when_supplied() {
        let existing = fresh(r#"{"isPublic": false}"#);
        assert!(!existing.is_public);

        let next = merge(
            Some(existing),
            &payload(r#"{"about": "x"}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        assert!(!next.is_public);
    }

    #[test]
    fn test_date_of_birth_scalar_rule() {
        let existing = fresh(r#"{"dateOfBirth": "1990-01-01"}"#);
        let next = merge(
            Some(existing),
            &payload(r#"{"dateOfBirth": ""}"#),
            "USER000001",
            "a@x.com",
            Utc::now(),
        );
        assert_eq!(
            next.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
    }
}
