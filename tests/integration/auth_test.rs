//! Integration tests for the authentication flow.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, unique};

#[tokio::test]
async fn login_wrong_password_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("badpass");
    app.create_user(&username, "password123", None).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_includes_person_and_roles() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("profile");
    app.create_user(&username, "password123", Some("user")).await;
    let (access, _) = app.login(&username, "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&access)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["username"].as_str().unwrap(), username);
    assert_eq!(data["person"]["firstname"].as_str().unwrap(), username);
    assert!(
        data["roles"]
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r == "user")
    );
}

#[tokio::test]
async fn register_answers_created_with_person() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("register");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "firstname": "Nora",
                "lastname": "Berg",
                "username": username,
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["username"].as_str().unwrap(), username);
    assert_eq!(data["person"]["firstname"].as_str().unwrap(), "Nora");
    assert_eq!(data["person"]["lastname"].as_str().unwrap(), "Berg");
}

#[tokio::test]
async fn refresh_rotates_the_token() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("rotate");
    app.create_user(&username, "password123", None).await;
    let (_, refresh) = app.login(&username, "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let rotated = response.body["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(rotated, refresh);

    // The presented token is dead after rotation.
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // The rotated token keeps working.
    let next = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": rotated })),
            None,
        )
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_revokes_and_stays_idempotent() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("logout");
    app.create_user(&username, "password123", None).await;
    let (access, refresh) = app.login(&username, "password123").await;

    let body = serde_json::json!({ "refresh_token": refresh });
    let response = app
        .request("POST", "/api/auth/logout", Some(body.clone()), Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The revoked token can no longer be redeemed.
    let replay = app
        .request("POST", "/api/auth/refresh", Some(body.clone()), None)
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // Logging out the same token again still succeeds; the record exists.
    let again = app
        .request("POST", "/api/auth/logout", Some(body), Some(&access))
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_unknown_token_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("unknown");
    app.create_user(&username, "password123", None).await;
    let (access, _) = app.login(&username, "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": "never-issued" })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_all_revokes_every_session() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("logoutall");
    app.create_user(&username, "password123", None).await;
    let (_, first) = app.login(&username, "password123").await;
    let (access, second) = app.login(&username, "password123").await;

    let response = app
        .request("POST", "/api/auth/logout-all", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"].as_u64().unwrap(), 2);

    for token in [first, second] {
        let replay = app
            .request(
                "POST",
                "/api/auth/refresh",
                Some(serde_json::json!({ "refresh_token": token })),
                None,
            )
            .await;
        assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    }
}
