//! End-to-end service flows over a real SQLite database

use support_api::config::DatabaseConfig;
use support_api::error::Error;
use support_api::merge::ProfileUpdate;
use support_api::persistence::Database;
use support_api::services::support::TicketRequest;
use support_api::services::{IdentityService, ProfileService, SupportService};

struct TestBackend {
    identity: IdentityService,
    profiles: ProfileService,
    support: SupportService,
    db: Database,
    // Dropping the directory deletes the database file.
    _dir: tempfile::TempDir,
}

async fn backend() -> TestBackend {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:{}", dir.path().join("test.db").display()),
        max_connections: 5,
        run_migrations: true,
    };
    let db = Database::connect(&config).await.unwrap();

    let identity = IdentityService::new(db.users(), db.sequences());
    let profiles = ProfileService::new(identity.clone(), db.profiles());
    let support = SupportService::new(identity.clone(), db.support());

    TestBackend {
        identity,
        profiles,
        support,
        db,
        _dir: dir,
    }
}

#[tokio::test]
async fn signup_allocates_sequential_public_ids() {
    let backend = backend().await;

    let first = backend
        .identity
        .signup("first@example.com", "password1")
        .await
        .unwrap();
    let second = backend
        .identity
        .signup("second@example.com", "password2")
        .await
        .unwrap();

    assert_eq!(first.user_id, "USER000001");
    assert_eq!(second.user_id, "USER000002");
    assert_eq!(first.email, "first@example.com");
    assert!(first.is_active);
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let backend = backend().await;

    backend
        .identity
        .signup("Jane@Example.com", "password1")
        .await
        .unwrap();

    let err = backend
        .identity
        .signup("jane@example.com", "password2")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Duplicate { .. }));

    // The failed signup burned a sequence value but left no identity behind.
    let next = backend
        .identity
        .signup("other@example.com", "password3")
        .await
        .unwrap();
    assert_eq!(next.user_id, "USER000003");
}

#[tokio::test]
async fn login_checks_credentials_and_activation() {
    let backend = backend().await;

    backend
        .identity
        .signup("user@example.com", "secret123")
        .await
        .unwrap();

    let err = backend
        .identity
        .login("user@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));

    let err = backend
        .identity
        .login("nobody@example.com", "secret123")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));

    let user = backend
        .identity
        .login("USER@example.com", "secret123")
        .await
        .unwrap();
    assert_eq!(user.email, "user@example.com");

    sqlx::query("UPDATE users SET is_active = 0 WHERE email = ?")
        .bind("user@example.com")
        .execute(backend.db.pool())
        .await
        .unwrap();

    let err = backend
        .identity
        .login("user@example.com", "secret123")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AccountDisabled));
}

#[tokio::test]
async fn concurrent_signups_get_distinct_ids() {
    let backend = backend().await;

    let signups = (0..10).map(|i| {
        let identity = backend.identity.clone();
        async move {
            identity
                .signup(&format!("user{i}@example.com"), "password1")
                .await
                .unwrap()
        }
    });

    let users = futures::future::join_all(signups).await;

    let mut ids: Vec<String> = users.into_iter().map(|u| u.user_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    assert!(ids.iter().all(|id| id.starts_with("USER")));
}

#[tokio::test]
async fn first_profile_read_seeds_from_identity() {
    let backend = backend().await;

    let user = backend
        .identity
        .signup("jane.doe@example.com", "password1")
        .await
        .unwrap();

    let profile = backend
        .profiles
        .get_or_create_default(&user.user_id)
        .await
        .unwrap();

    assert_eq!(profile.name, "jane.doe");
    assert_eq!(profile.email, "jane.doe@example.com");
    assert_eq!(profile.country_code, "+91");
    assert!(profile.is_public);
    // name + email filled, out of the nine scored fields
    assert_eq!(profile.completeness, 22);

    // A second read returns the stored profile, not a fresh seed.
    let again = backend
        .profiles
        .get_or_create_default(&user.user_id)
        .await
        .unwrap();
    assert_eq!(again, profile);
}

#[tokio::test]
async fn partial_upsert_merges_and_rescores() {
    let backend = backend().await;

    let user = backend
        .identity
        .signup("dev@example.com", "password1")
        .await
        .unwrap();

    let payload: ProfileUpdate = serde_json::from_str(
        r#"{"about": "Systems programmer", "socialMedia": {"github": "https://github.com/dev"}}"#,
    )
    .unwrap();

    let (profile, created) = backend.profiles.upsert(&user.user_id, &payload).await.unwrap();
    assert!(created);
    assert_eq!(profile.about, "Systems programmer");
    assert_eq!(profile.social_media.github, "https://github.com/dev");
    // name, email and about are scored; github is not a scored field.
    assert_eq!(profile.completeness, 33);

    // Omitted fields survive the next update; supplied empties clear.
    let payload: ProfileUpdate =
        serde_json::from_str(r#"{"phoneNumber": "9876543210", "socialMedia": {"github": ""}}"#)
            .unwrap();

    let (profile, created) = backend.profiles.upsert(&user.user_id, &payload).await.unwrap();
    assert!(!created);
    assert_eq!(profile.about, "Systems programmer");
    assert_eq!(profile.phone_number, "9876543210");
    assert_eq!(profile.social_media.github, "");
    assert_eq!(profile.completeness, 44);
}

#[tokio::test]
async fn upsert_for_unknown_identity_fails_before_writing() {
    let backend = backend().await;

    let err = backend
        .profiles
        .upsert("USER999999", &ProfileUpdate::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn photo_can_be_set_and_cleared() {
    let backend = backend().await;

    let user = backend
        .identity
        .signup("photo@example.com", "password1")
        .await
        .unwrap();

    // Setting a photo before any profile exists seeds one.
    let profile = backend
        .profiles
        .set_photo(&user.user_id, "https://cdn.example.com/me.png".to_string())
        .await
        .unwrap();
    assert_eq!(
        profile.profile_photo.as_deref(),
        Some("https://cdn.example.com/me.png")
    );

    let profile = backend.profiles.clear_photo(&user.user_id).await.unwrap();
    assert_eq!(profile.profile_photo, None);
}

#[tokio::test]
async fn clearing_photo_without_profile_is_not_found() {
    let backend = backend().await;

    let user = backend
        .identity
        .signup("nophoto@example.com", "password1")
        .await
        .unwrap();

    let err = backend.profiles.clear_photo(&user.user_id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn private_profiles_cannot_be_shared_or_listed() {
    let backend = backend().await;

    let user = backend
        .identity
        .signup("private@example.com", "password1")
        .await
        .unwrap();

    let payload: ProfileUpdate = serde_json::from_str(r#"{"isPublic": false}"#).unwrap();
    backend.profiles.upsert(&user.user_id, &payload).await.unwrap();

    let err = backend.profiles.shareable(&user.user_id).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));

    assert!(backend.profiles.list_public().await.unwrap().is_empty());

    // Flipping back to public makes both views available again.
    let payload: ProfileUpdate = serde_json::from_str(r#"{"isPublic": true}"#).unwrap();
    backend.profiles.upsert(&user.user_id, &payload).await.unwrap();

    let shared = backend.profiles.shareable(&user.user_id).await.unwrap();
    assert_eq!(shared.user_id, user.user_id);
    assert_eq!(backend.profiles.list_public().await.unwrap().len(), 1);
}

#[tokio::test]
async fn tickets_link_to_identities() {
    let backend = backend().await;

    let user = backend
        .identity
        .signup("help@example.com", "password1")
        .await
        .unwrap();

    let ticket = backend
        .support
        .create(TicketRequest {
            user_id: user.user_id.clone(),
            email: None,
            subject: "Cannot update profile".to_string(),
            description: "Saving my profile returns an error".to_string(),
            screenshot: None,
            contact_number: "9876543210".to_string(),
        })
        .await
        .unwrap();

    // Omitted email falls back to the identity's email.
    assert_eq!(ticket.email, "help@example.com");
    assert_eq!(ticket.status.as_str(), "pending");

    let fetched = backend.support.get(&ticket.id).await.unwrap();
    assert_eq!(fetched.subject, "Cannot update profile");

    let mine = backend.support.list_for_user(&user.user_id).await.unwrap();
    assert_eq!(mine.len(), 1);

    let all = backend.support.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn ticket_for_unknown_identity_is_not_found() {
    let backend = backend().await;

    let err = backend
        .support
        .create(TicketRequest {
            user_id: "USER424242".to_string(),
            email: None,
            subject: "Hello there".to_string(),
            description: "Nobody owns this ticket".to_string(),
            screenshot: None,
            contact_number: "9876543210".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let err = backend.support.get("no-such-id").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let err = backend.support.list_for_user("USER424242").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
