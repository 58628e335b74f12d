//! Integration tests for hierarchy-based permissions and promotion flows.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, unique};

#[tokio::test]
async fn ancestor_admin_manages_descendants() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("divadmin");
    let user_id = app.create_user(&username, "password123", None).await;

    let root = app.create_division(&unique("root"), None).await;
    let child = app.create_division(&unique("child"), Some(root)).await;
    let grandchild = app.create_division(&unique("grandchild"), Some(child)).await;
    app.add_division_member(root, user_id, "admin").await;

    let (access, _) = app.login(&username, "password123").await;
    let response = app
        .request(
            "PATCH",
            &format!("/api/divisions/{grandchild}"),
            Some(serde_json::json!({ "description": "renumbered" })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn ancestor_member_views_but_cannot_manage() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("divmember");
    let user_id = app.create_user(&username, "password123", None).await;

    let root = app.create_division(&unique("root"), None).await;
    let child = app.create_division(&unique("child"), Some(root)).await;
    app.add_division_member(root, user_id, "member").await;

    let (access, _) = app.login(&username, "password123").await;

    let view = app
        .request("GET", &format!("/api/divisions/{child}"), None, Some(&access))
        .await;
    assert_eq!(view.status, StatusCode::OK);

    let manage = app
        .request(
            "PATCH",
            &format!("/api/divisions/{child}"),
            Some(serde_json::json!({ "description": "nope" })),
            Some(&access),
        )
        .await;
    assert_eq!(manage.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn division_manager_role_grants_no_structural_authority() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("divmanager");
    let user_id = app.create_user(&username, "password123", None).await;

    let division = app.create_division(&unique("ops"), None).await;
    app.add_division_member(division, user_id, "manager").await;

    let (access, _) = app.login(&username, "password123").await;
    let response = app
        .request(
            "PATCH",
            &format!("/api/divisions/{division}"),
            Some(serde_json::json!({ "description": "still nope" })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn division_authority_extends_to_teams() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("teamfall");
    let user_id = app.create_user(&username, "password123", None).await;

    let root = app.create_division(&unique("root"), None).await;
    let child = app.create_division(&unique("child"), Some(root)).await;
    let team = app.create_team(&unique("eagles"), Some(child)).await;
    app.add_division_member(root, user_id, "admin").await;

    let (access, _) = app.login(&username, "password123").await;
    let response = app
        .request(
            "PATCH",
            &format!("/api/teams/{team}"),
            Some(serde_json::json!({ "description": "fielded" })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn proxy_team_promotion() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("promoter");
    app.create_user(&username, "password123", Some("admin")).await;
    let responsible = app.create_person("Jonas", "Lund").await;

    let (access, _) = app.login(&username, "password123").await;

    let created = app
        .request(
            "POST",
            "/api/teams/proxy",
            Some(serde_json::json!({
                "name": unique("visitors"),
                "external_org": "Rival Club",
            })),
            Some(&access),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let team = &created.body["data"];
    assert!(team["responsible_id"].is_null());
    assert!(team["promoted_at"].is_null());
    let team_id = team["id"].as_str().unwrap().to_string();

    let promoted = app
        .request(
            "POST",
            &format!("/api/teams/{team_id}/promote"),
            Some(serde_json::json!({ "responsible_id": responsible })),
            Some(&access),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    let team = &promoted.body["data"];
    assert_eq!(
        team["responsible_id"].as_str().unwrap(),
        responsible.to_string()
    );
    assert!(!team["promoted_at"].is_null());

    // A team with a responsible person cannot be promoted again.
    let again = app
        .request(
            "POST",
            &format!("/api/teams/{team_id}/promote"),
            Some(serde_json::json!({ "responsible_id": responsible })),
            Some(&access),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn promoting_an_existing_user_conflicts() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let admin = unique("promadmin");
    app.create_user(&admin, "password123", Some("admin")).await;
    let existing = unique("existing");
    let existing_id = app.create_user(&existing, "password123", None).await;

    let (access, _) = app.login(&admin, "password123").await;
    let response = app
        .request(
            "POST",
            &format!("/api/persons/{existing_id}/promote"),
            Some(serde_json::json!({
                "username": unique("second"),
                "password": "password123",
            })),
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn cyclic_hierarchy_is_reported_as_an_error() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let username = unique("cyclist");
    app.create_user(&username, "password123", None).await;

    let a = app.create_division(&unique("a"), None).await;
    let b = app.create_division(&unique("b"), Some(a)).await;

    // Corrupt the tree directly; the API refuses to create such a link.
    sqlx::query("UPDATE divisions SET parent_id = $2 WHERE id = $1")
        .bind(a)
        .bind(b)
        .execute(&app.db_pool)
        .await
        .expect("Failed to corrupt hierarchy");

    let (access, _) = app.login(&username, "password123").await;
    let response = app
        .request("GET", &format!("/api/divisions/{a}"), None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
