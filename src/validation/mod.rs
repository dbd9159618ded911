//! Declarative per-field validation
//!
//! Each request kind has a rule table of `(field, value, rules)` entries
//! evaluated uniformly. Every violation in a request is collected and
//! reported together; nothing is persisted when any rule fails.
//!
//! Rules other than [`Rule::Required`] only fire on supplied, non-empty
//! values — an absent or empty optional field always passes, matching the
//! merge engine's treatment of empty as "clear".

pub mod social;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::merge::{parse_date, Patch, ProfileUpdate};

/// Email format accepted across the API
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("Invalid email regex pattern")
});

/// A single acceptance rule for one field
pub enum Rule {
    /// Value must be supplied and non-empty
    Required,
    /// Value must match the shared email pattern
    Email,
    /// Minimum length in characters
    MinLen(usize),
    /// Maximum length in characters
    MaxLen(usize),
    /// Inclusive length bounds
    LenRange(usize, usize),
    /// Exactly `n` decimal digits
    Digits(usize),
    /// Value must be one of the listed alternatives
    OneOf(&'static [&'static str]),
    /// ISO `YYYY-MM-DD` date
    IsoDate,
    /// Platform-specific handle/URL check returning its own message
    Custom(fn(&str) -> Option<String>),
}

/// One field of a request together with its rules
pub struct FieldCheck<'a> {
    pub label: &'static str,
    pub value: Option<&'a str>,
    pub rules: &'a [Rule],
}

/// Evaluate a rule table, collecting every violation
pub fn evaluate(checks: &[FieldCheck<'_>]) -> Result<()> {
    let mut violations = Vec::new();

    for check in checks {
        let supplied = check.value.filter(|v| !v.is_empty());

        for rule in check.rules {
            if let Rule::Required = rule {
                if supplied.is_none() {
                    violations.push(format!("{} is required", check.label));
                }
                continue;
            }

            let Some(value) = supplied else { continue };
            if let Some(message) = apply_rule(check.label, value, rule) {
                violations.push(message);
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(violations))
    }
}

fn apply_rule(label: &str, value: &str, rule: &Rule) -> Option<String> {
    match rule {
        Rule::Required => None,
        Rule::Email => (!EMAIL_PATTERN.is_match(value))
            .then(|| "Please provide a valid email".to_string()),
        Rule::MinLen(min) => (value.chars().count() < *min)
            .then(|| format!("{label} must be at least {min} characters long")),
        Rule::MaxLen(max) => (value.chars().count() > *max)
            .then(|| format!("{label} cannot exceed {max} characters")),
        Rule::LenRange(min, max) => {
            let len = value.chars().count();
            (len < *min || len > *max)
                .then(|| format!("{label} must be between {min} and {max} characters long"))
        }
        Rule::Digits(n) => {
            let ok = value.len() == *n && value.bytes().all(|b| b.is_ascii_digit());
            (!ok).then(|| format!("{label} must be exactly {n} digits"))
        }
        Rule::OneOf(choices) => (!choices.contains(&value)).then(|| {
            let (last, rest) = choices.split_last().expect("OneOf with no choices");
            format!("{label} must be {}, or {last}", rest.join(", "))
        }),
        Rule::IsoDate => {
            (parse_date(value).is_none()).then(|| format!("{label} must be a valid date"))
        }
        Rule::Custom(check) => check(value),
    }
}

/// Rules for user signup; the minimum password length comes from config
pub fn validate_signup(
    email: Option<&str>,
    password: Option<&str>,
    min_password_length: usize,
) -> Result<()> {
    let password_rules = [Rule::Required, Rule::MinLen(min_password_length)];

    evaluate(&[
        FieldCheck {
            label: "Email",
            value: email,
            rules: &[Rule::Required, Rule::Email],
        },
        FieldCheck {
            label: "Password",
            value: password,
            rules: &password_rules,
        },
    ])
}

/// Rules for user login
pub fn validate_login(email: Option<&str>, password: Option<&str>) -> Result<()> {
    evaluate(&[
        FieldCheck {
            label: "Email",
            value: email,
            rules: &[Rule::Required, Rule::Email],
        },
        FieldCheck {
            label: "Password",
            value: password,
            rules: &[Rule::Required],
        },
    ])
}

/// Rules for a partial profile payload
///
/// Every field is optional; rules fire only on supplied values so the merge
/// engine's omitted-vs-empty semantics stay reachable.
pub fn validate_profile(payload: &ProfileUpdate) -> Result<()> {
    let social = payload.social_media.as_ref();

    evaluate(&[
        FieldCheck {
            label: "Email",
            value: payload.email.as_deref(),
            rules: &[Rule::Email],
        },
        FieldCheck {
            label: "Date of birth",
            value: payload.date_of_birth.as_deref(),
            rules: &[Rule::IsoDate],
        },
        FieldCheck {
            label: "Gender",
            value: patch_value(&payload.gender),
            rules: &[Rule::OneOf(&["Male", "Female", "Other"])],
        },
        FieldCheck {
            label: "Phone number",
            value: patch_value(&payload.phone_number),
            rules: &[Rule::Digits(10)],
        },
        FieldCheck {
            label: "About section",
            value: patch_value(&payload.about),
            rules: &[Rule::MaxLen(500)],
        },
        FieldCheck {
            label: "LinkedIn",
            value: social.and_then(|s| patch_value(&s.linkedin)),
            rules: &[Rule::Custom(social::check_linkedin)],
        },
        FieldCheck {
            label: "Website",
            value: social.and_then(|s| patch_value(&s.website)),
            rules: &[Rule::Custom(social::check_website)],
        },
        FieldCheck {
            label: "Instagram",
            value: social.and_then(|s| patch_value(&s.instagram)),
            rules: &[Rule::Custom(social::check_instagram)],
        },
        FieldCheck {
            label: "YouTube",
            value: social.and_then(|s| patch_value(&s.youtube)),
            rules: &[Rule::Custom(social::check_youtube)],
        },
        FieldCheck {
            label: "GitHub",
            value: social.and_then(|s| patch_value(&s.github)),
            rules: &[Rule::Custom(social::check_github)],
        },
        FieldCheck {
            label: "Twitter",
            value: social.and_then(|s| patch_value(&s.twitter)),
            rules: &[Rule::Custom(social::check_twitter)],
        },
    ])
}

/// Rules for opening a support ticket
pub fn validate_ticket(
    user_id: Option<&str>,
    email: Option<&str>,
    subject: Option<&str>,
    description: Option<&str>,
    contact_number: Option<&str>,
) -> Result<()> {
    evaluate(&[
        FieldCheck {
            label: "User ID",
            value: user_id,
            rules: &[Rule::Required],
        },
        FieldCheck {
            label: "Email",
            value: email,
            rules: &[Rule::Email],
        },
        FieldCheck {
            label: "Subject",
            value: subject,
            rules: &[Rule::Required, Rule::LenRange(5, 100)],
        },
        FieldCheck {
            label: "Description",
            value: description,
            rules: &[Rule::Required, Rule::LenRange(10, 1000)],
        },
        FieldCheck {
            label: "Contact number",
            value: contact_number,
            rules: &[Rule::Required, Rule::Digits(10)],
        },
    ])
}

fn patch_value(patch: &Patch<String>) -> Option<&str> {
    patch.value().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(result: Result<()>) -> Vec<String> {
        match result {
            Err(Error::Validation(v)) => v,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_signup_collects_all_violations() {
        let msgs = violations(validate_signup(Some("not-an-email"), Some("short"), 6));
        assert_eq!(msgs.len(), 2);
        assert!(msgs.contains(&"Please provide a valid email".to_string()));
        assert!(msgs.contains(&"Password must be at least 6 characters long".to_string()));
    }

    #[test]
    fn test_signup_requires_both_fields() {
        let msgs = violations(validate_signup(None, None, 6));
        assert!(msgs.contains(&"Email is required".to_string()));
        assert!(msgs.contains(&"Password is required".to_string()));
    }

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_PATTERN.is_match("a@x.com"));
        assert!(EMAIL_PATTERN.is_match("jane.doe@sub.example.org"));
        assert!(!EMAIL_PATTERN.is_match("jane@"));
        assert!(!EMAIL_PATTERN.is_match("@x.com"));
    }

    #[test]
    fn test_empty_profile_payload_passes() {
        assert!(validate_profile(&ProfileUpdate::default()).is_ok());
    }

    #[test]
    fn test_profile_rules_fire_on_supplied_values() {
        let payload: ProfileUpdate = serde_json::from_str(
            r#"{"gender": "Unknown", "phoneNumber": "12345", "dateOfBirth": "yesterday"}"#,
        )
        .unwrap();

        let msgs = violations(validate_profile(&payload));
        assert_eq!(msgs.len(), 3);
        assert!(msgs.contains(&"Gender must be Male, Female, or Other".to_string()));
        assert!(msgs.contains(&"Phone number must be exactly 10 digits".to_string()));
        assert!(msgs.contains(&"Date of birth must be a valid date".to_string()));
    }

    #[test]
    fn test_explicit_empty_clearable_passes() {
        // Clearing a field must not trip its format rules.
        let payload: ProfileUpdate =
            serde_json::from_str(r#"{"gender": "", "phoneNumber": "", "about": ""}"#).unwrap();
        assert!(validate_profile(&payload).is_ok());
    }

    #[test]
    fn test_about_length_bound() {
        let long = "x".repeat(501);
        let payload: ProfileUpdate =
            serde_json::from_str(&format!(r#"{{"about": "{long}"}}"#)).unwrap();

        let msgs = violations(validate_profile(&payload));
        assert_eq!(
            msgs,
            vec!["About section cannot exceed 500 characters".to_string()]
        );
    }

    #[test]
    fn test_ticket_subject_length() {
        let msgs = violations(validate_ticket(
            Some("USER000001"),
            Some("a@x.com"),
            Some("hiya"),
            Some("long enough description"),
            Some("9876543210"),
        ));
        assert_eq!(
            msgs,
            vec!["Subject must be between 5 and 100 characters long".to_string()]
        );
    }

    #[test]
    fn test_ticket_email_optional() {
        // Email defaults to the identity's email when omitted.
        assert!(validate_ticket(
            Some("USER000001"),
            None,
            Some("Printer on fire"),
            Some("It is genuinely on fire"),
            Some("9876543210"),
        )
        .is_ok());
    }
}
