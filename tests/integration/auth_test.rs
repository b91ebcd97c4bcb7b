//! Integration tests for registration, login, logout, and profile changes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_then_duplicate_email_conflicts() {
    let app = TestApp::new();
    let user = app.register("ann@example.com").await;
    assert_eq!(user["email"], "ann@example.com");
    assert!(user.get("password_hash").is_none());

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "ANN@example.com",
                "password": PASSWORD,
                "confirm_password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Email already used.");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let mismatch = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "ann@example.com",
                "password": PASSWORD,
                "confirm_password": "password124",
            })),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mismatch.body["details"]["confirm_password"].is_array());

    let bad_email = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "email": "not-an-email",
                "password": PASSWORD,
                "confirm_password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::UNPROCESSABLE_ENTITY);

    let malformed = app
        .request_raw("POST", "/auth/register", "{\"email\":".to_string(), None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.message(), "Malformed JSON.");
}

#[tokio::test]
async fn test_password_length_follows_config() {
    let register = |password: &str| {
        json!({
            "email": "ann@example.com",
            "password": password,
            "confirm_password": password,
        })
    };

    let app = TestApp::new();
    let short = app
        .request("POST", "/auth/register", Some(register("seven77")), None)
        .await;
    assert_eq!(short.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(short.message(), "Password must be between 8 and 64 characters.");

    let strict = TestApp::with_config(|config| config.auth.password_min_length = 12);
    let rejected = strict
        .request("POST", "/auth/register", Some(register("elevenchars")), None)
        .await;
    assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(rejected.message(), "Password must be between 12 and 64 characters.");

    let accepted = strict
        .request("POST", "/auth/register", Some(register("twelve-chars")), None)
        .await;
    assert_eq!(accepted.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_sets_http_only_cookie() {
    let app = TestApp::new();
    app.register("ann@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "Ann@Example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["email"], "ann@example.com");
    assert!(response.body["data"]["expires_at"].is_string());

    let cookie = response.set_cookie.clone().unwrap_or_default();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("Path=/"));
    assert!(response.session_token().is_some_and(|t| t.len() >= 20));
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new();
    app.register("ann@example.com").await;

    for (email, password) in [("ann@example.com", "wrongpassword"), ("nobody@example.com", PASSWORD)] {
        let response = app
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.message(), "Invalid email or password.");
        assert!(response.set_cookie.is_none());
    }
}

#[tokio::test]
async fn test_check_requires_a_valid_session() {
    let app = TestApp::new();
    let (_, token) = app.signup("ann@example.com").await;

    let ok = app.request("GET", "/auth/check", None, Some(&token)).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["email"], "ann@example.com");

    let missing = app.request("GET", "/auth/check", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .request("GET", "/auth/check", None, Some("not-a-real-session-token"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_and_clears_cookie() {
    let app = TestApp::new();
    let (_, token) = app.signup("ann@example.com").await;
    let other_device = app.login("ann@example.com").await;

    let response = app.request("POST", "/auth/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.session_token().as_deref(), Some(""));

    let check = app.request("GET", "/auth/check", None, Some(&token)).await;
    assert_eq!(check.status, StatusCode::UNAUTHORIZED);
    let again = app.request("POST", "/auth/logout", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);

    // Other sessions of the same user are untouched.
    let other = app.request("GET", "/auth/check", None, Some(&other_device)).await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_updates() {
    let app = TestApp::new();
    let (_, token) = app.signup("ann@example.com").await;
    app.register("bob@example.com").await;

    let named = app
        .request("PATCH", "/profile", Some(json!({ "name": "Ann" })), Some(&token))
        .await;
    assert_eq!(named.status, StatusCode::OK);
    assert_eq!(named.body["data"]["name"], "Ann");

    let same = app
        .request(
            "PATCH",
            "/profile/email",
            Some(json!({ "email": "ann@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(same.status, StatusCode::BAD_REQUEST);

    let taken = app
        .request(
            "PATCH",
            "/profile/email",
            Some(json!({ "email": "bob@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    let wrong_current = app
        .request(
            "PATCH",
            "/profile/password",
            Some(json!({
                "current_password": "not-my-password",
                "password": "new-password-1",
                "confirm_password": "new-password-1",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::UNPROCESSABLE_ENTITY);

    let changed = app
        .request(
            "PATCH",
            "/profile/password",
            Some(json!({
                "current_password": PASSWORD,
                "password": "new-password-1",
                "confirm_password": "new-password-1",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let old_login = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(old_login.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
