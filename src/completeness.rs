//! Profile completeness scoring
//!
//! A deterministic 0-100 score over a fixed, ordered set of nine fields.
//! Two of the six social-media sub-fields (linkedin, website) participate
//! and the other four do not; this asymmetry is preserved from the observed
//! behavior of the system and is intentional.

use crate::persistence::ProfileRecord;

/// Number of fields participating in the score
const FIELD_COUNT: usize = 9;

/// Compute the completeness score of a profile
///
/// A field counts as filled when it is present and not the empty string.
/// The score is `round(filled / 9 * 100)` and is recomputed on every
/// persist; it is never accepted as external input.
pub fn score(profile: &ProfileRecord) -> i64 {
    let fields = [
        !profile.name.is_empty(),
        !profile.email.is_empty(),
        profile
            .profile_photo
            .as_deref()
            .is_some_and(|p| !p.is_empty()),
        profile.date_of_birth.is_some(),
        !profile.gender.is_empty(),
        !profile.phone_number.is_empty(),
        !profile.about.is_empty(),
        !profile.social_media.linkedin.is_empty(),
        !profile.social_media.website.is_empty(),
    ];

    let filled = fields.iter().filter(|&&f| f).count();
    (filled as f64 / FIELD_COUNT as f64 * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn empty_profile() -> ProfileRecord {
        let mut profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        profile.name = String::new();
        profile.email = String::new();
        profile
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(score(&empty_profile()), 0);
    }

    #[test]
    fn test_seeded_profile_scores_two_of_nine() {
        // Name and email are seeded from the identity.
        let profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        assert_eq!(score(&profile), 22);
    }

    #[test]
    fn test_three_fields_round_to_33() {
        let mut profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        profile.about = "hi".to_string();
        assert_eq!(score(&profile), 33);
    }

    #[test]
    fn test_full_profile_scores_hundred() {
        let mut profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        profile.profile_photo = Some("/uploads/me.png".to_string());
        profile.date_of_birth = NaiveDate::from_ymd_opt(1990, 1, 1);
        profile.gender = "Other".to_string();
        profile.phone_number = "9876543210".to_string();
        profile.about = "hello".to_string();
        profile.social_media.linkedin = "jane".to_string();
        profile.social_media.website = "https://example.com".to_string();
        assert_eq!(score(&profile), 100);
    }

    #[test]
    fn test_excluded_socials_do_not_count() {
        let mut profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        let base = score(&profile);

        profile.social_media.github = "octocat".to_string();
        profile.social_media.twitter = "@octocat".to_string();
        profile.social_media.instagram = "octo".to_string();
        profile.social_media.youtube = "@octo".to_string();
        assert_eq!(score(&profile), base);
    }

    #[test]
    fn test_empty_string_photo_is_unfilled() {
        let mut profile = ProfileRecord::seeded("USER000001", "a@x.com", Utc::now());
        let base = score(&profile);
        profile.profile_photo = Some(String::new());
        assert_eq!(score(&profile), base);
    }
}
