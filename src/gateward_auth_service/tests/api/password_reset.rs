use axum::http::StatusCode;
use chrono::{Duration, Utc};
use gateward_adapters::{email::FailingEmailClient, persistence::verify_password_hash};
use gateward_core::{Email, Password, Role, UserStore};
use secrecy::ExposeSecret;
use serde_json::json;

use crate::helpers::{TestApp, post_json};

fn email() -> Email {
    Email::try_from("user@example.com".to_owned()).unwrap()
}

#[tokio::test]
async fn requesting_a_reset_for_an_existing_user_returns_200_and_persists_a_token() {
    let app = TestApp::new();
    app.seed_user("user@example.com", "old-password", Role::User)
        .await;

    let before = Utc::now();
    let (status, body) = post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset token sent");

    let user = app.user_store.find_user_by_email(&email()).await.unwrap();
    assert!(user.has_pending_reset());

    let expiry = user.reset_token_expiry().unwrap();
    assert!(expiry >= before + Duration::hours(1));
    assert!(expiry < before + Duration::hours(1) + Duration::seconds(5));
}

#[tokio::test]
async fn the_notification_carries_the_persisted_token() {
    let app = TestApp::new();
    app.seed_user("user@example.com", "old-password", Role::User)
        .await;

    post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;

    let sent = app.email_client.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, email());
    assert_eq!(sent[0].template, "password_reset");

    let user = app.user_store.find_user_by_email(&email()).await.unwrap();
    assert_eq!(
        sent[0].variables["token"],
        user.reset_token().unwrap().as_str()
    );
}

#[tokio::test]
async fn requesting_a_reset_for_an_unknown_email_returns_404_without_side_effects() {
    let app = TestApp::new();

    let (status, body) = post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "missing@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn a_malformed_email_is_a_bad_request() {
    let app = TestApp::new();

    let (status, _) = post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "not-an-email" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn an_unknown_token_returns_400() {
    let app = TestApp::new();

    let (status, body) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": "abc", "newPassword": "new-password" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn a_full_reset_round_trip_succeeds_exactly_once() {
    let app = TestApp::new();
    app.seed_user("user@example.com", "old-password", Role::User)
        .await;
    let before = app.user_store.find_user_by_email(&email()).await.unwrap();

    let (status, _) = post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = app.email_client.sent().await[0].variables["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let (status, body) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": token, "newPassword": "brand-new-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password set successfully");

    // Stored hash changed, token fields cleared, new password verifies.
    let after = app.user_store.find_user_by_email(&email()).await.unwrap();
    assert!(!after.has_pending_reset());
    assert_ne!(
        before.password_hash().expose_secret(),
        after.password_hash().expose_secret()
    );
    verify_password_hash(
        after.password_hash().clone(),
        Password::try_from("brand-new-password".to_owned()).unwrap(),
    )
    .await
    .unwrap();

    // The consumed token never works again.
    let (status, body) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": token, "newPassword": "another-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn a_second_request_invalidates_the_first_token() {
    let app = TestApp::new();
    app.seed_user("user@example.com", "old-password", Role::User)
        .await;

    post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;
    post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;

    let sent = app.email_client.sent().await;
    let first_token = sent[0].variables["token"].as_str().unwrap();

    let (status, body) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": first_token, "newPassword": "new-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired token");

    let second_token = sent[1].variables["token"].as_str().unwrap();
    let (status, _) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": second_token, "newPassword": "new-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn a_short_new_password_is_rejected_and_the_token_survives() {
    let app = TestApp::new();
    app.seed_user("user@example.com", "old-password", Role::User)
        .await;

    post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;
    let token = app.email_client.sent().await[0].variables["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let (status, _) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": token, "newPassword": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was consumed; a valid retry goes through.
    let (status, _) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": token, "newPassword": "long-enough-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn a_failed_notification_keeps_the_token_valid_and_reports_success() {
    let (app, _client) = TestApp::with_email_client(FailingEmailClient);
    app.seed_user("user@example.com", "old-password", Role::User)
        .await;

    let (status, body) = post_json(
        &app.router,
        "/request-password-reset",
        json!({ "email": "user@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset token sent");

    // The persisted token is still consumable through a recovery path.
    let user = app.user_store.find_user_by_email(&email()).await.unwrap();
    let token = user.reset_token().unwrap().as_str().to_owned();

    let (status, _) = post_json(
        &app.router,
        "/set-password",
        json!({ "token": token, "newPassword": "recovered-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
