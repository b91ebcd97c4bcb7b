//! Integration tests for member role changes and removal.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

struct Shared {
    app: TestApp,
    note_id: String,
    owner: String,
    editor_id: String,
    editor: String,
    viewer_id: String,
    viewer: String,
}

async fn shared_note() -> Shared {
    let app = TestApp::new();
    let (_, owner) = app.signup("owner@example.com").await;
    let (editor_id, editor) = app.signup("editor@example.com").await;
    let (viewer_id, viewer) = app.signup("viewer@example.com").await;
    let note_id = app.create_note(&owner, "Team notes").await;
    app.share(&owner, &note_id, "editor@example.com", &editor, "editor")
        .await;
    app.share(&owner, &note_id, "viewer@example.com", &viewer, "viewer")
        .await;
    Shared {
        app,
        note_id,
        owner,
        editor_id,
        editor,
        viewer_id,
        viewer,
    }
}

impl Shared {
    fn member_path(&self, member_id: &str) -> String {
        format!("/notes/{}/members/{member_id}", self.note_id)
    }

    async fn role_of(&self, token: &str) -> Option<String> {
        let response = self
            .app
            .request("GET", &format!("/notes/{}", self.note_id), None, Some(token))
            .await;
        response.body["data"]["role"].as_str().map(String::from)
    }
}

#[tokio::test]
async fn test_owner_changes_roles() {
    let s = shared_note().await;

    let response = s
        .app
        .request(
            "PATCH",
            &s.member_path(&s.viewer_id),
            Some(json!({ "role": "editor" })),
            Some(&s.owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(s.role_of(&s.viewer).await.as_deref(), Some("editor"));

    let invalid = s
        .app
        .request(
            "PATCH",
            &s.member_path(&s.viewer_id),
            Some(json!({ "role": "owner" })),
            Some(&s.owner),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);

    let stranger = "0190b5a8-0000-7000-8000-000000000000";
    let missing = s
        .app
        .request(
            "PATCH",
            &s.member_path(stranger),
            Some(json!({ "role": "viewer" })),
            Some(&s.owner),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_members_cannot_change_roles() {
    let s = shared_note().await;

    for token in [&s.editor, &s.viewer] {
        let response = s
            .app
            .request(
                "PATCH",
                &s.member_path(&s.viewer_id),
                Some(json!({ "role": "editor" })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
    assert_eq!(s.role_of(&s.viewer).await.as_deref(), Some("viewer"));
}

#[tokio::test]
async fn test_owner_removes_member() {
    let s = shared_note().await;

    let response = s
        .app
        .request("DELETE", &s.member_path(&s.editor_id), None, Some(&s.owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Member removed.");
    assert_eq!(s.role_of(&s.editor).await, None);

    let again = s
        .app
        .request("DELETE", &s.member_path(&s.editor_id), None, Some(&s.owner))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_members_cannot_remove_others() {
    let s = shared_note().await;

    let response = s
        .app
        .request("DELETE", &s.member_path(&s.viewer_id), None, Some(&s.editor))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = s
        .app
        .request("DELETE", &s.member_path(&s.editor_id), None, Some(&s.viewer))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    assert_eq!(s.role_of(&s.viewer).await.as_deref(), Some("viewer"));
    assert_eq!(s.role_of(&s.editor).await.as_deref(), Some("editor"));
}

#[tokio::test]
async fn test_member_leaves_note() {
    let s = shared_note().await;

    let response = s
        .app
        .request("DELETE", &s.member_path(&s.viewer_id), None, Some(&s.viewer))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(s.role_of(&s.viewer).await, None);
    assert_eq!(s.role_of(&s.owner).await.as_deref(), Some("owner"));
}

#[tokio::test]
async fn test_invalid_member_id() {
    let s = shared_note().await;
    let response = s
        .app
        .request("DELETE", &s.member_path("nope"), None, Some(&s.owner))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}
