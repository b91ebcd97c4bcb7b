//! Integration tests for the invitation flow.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_viewer_invitation_flow() {
    let app = TestApp::new();
    let (_, owner) = app.signup("owner@example.com").await;
    let (_, viewer) = app.signup("viewer@example.com").await;
    let note_id = app.create_note(&owner, "Roadmap").await;

    let invitation_id = app
        .invite(&owner, &note_id, "Viewer@Example.com", "viewer")
        .await;

    let pending = app
        .request("GET", "/note-invitations", None, Some(&viewer))
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    assert_eq!(pending.body["data"][0]["id"], invitation_id.as_str());
    assert_eq!(pending.body["data"][0]["note"]["title"], "Roadmap");
    assert_eq!(pending.body["data"][0]["inviter"]["email"], "owner@example.com");
    assert_eq!(pending.body["data"][0]["role"], "viewer");

    // The owner sees nothing addressed to them.
    let owner_inbox = app
        .request("GET", "/note-invitations", None, Some(&owner))
        .await;
    assert_eq!(owner_inbox.body["data"].as_array().map(Vec::len), Some(0));

    let accepted = app
        .request(
            "PATCH",
            &format!("/note-invitations/{invitation_id}"),
            Some(json!({ "accept": true })),
            Some(&viewer),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.message(), "Invitation accepted.");

    let path = format!("/notes/{note_id}");
    let read = app.request("GET", &path, None, Some(&viewer)).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"]["role"], "viewer");

    let edit = json!({ "title": "Roadmap v2" });
    let viewer_edit = app
        .request("PATCH", &path, Some(edit.clone()), Some(&viewer))
        .await;
    assert_eq!(viewer_edit.status, StatusCode::NOT_FOUND);
    let owner_edit = app.request("PATCH", &path, Some(edit), Some(&owner)).await;
    assert_eq!(owner_edit.status, StatusCode::OK);

    let listed = app.request("GET", "/notes", None, Some(&viewer)).await;
    assert_eq!(listed.body["data"]["items"][0]["role"], "viewer");

    let inbox = app
        .request("GET", "/note-invitations", None, Some(&viewer))
        .await;
    assert_eq!(inbox.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_rejections() {
    let app = TestApp::new();
    let (_, owner) = app.signup("owner@example.com").await;
    let (_, editor) = app.signup("editor@example.com").await;
    app.register("target@example.com").await;
    let note_id = app.create_note(&owner, "Plans").await;
    app.share(&owner, &note_id, "editor@example.com", &editor, "editor")
        .await;

    app.invite(&owner, &note_id, "target@example.com", "editor").await;

    let cases = [
        (&owner, "target@example.com", "viewer", StatusCode::CONFLICT),
        (&owner, "owner@example.com", "viewer", StatusCode::BAD_REQUEST),
        (&owner, "ghost@example.com", "viewer", StatusCode::NOT_FOUND),
        (&owner, "editor@example.com", "viewer", StatusCode::CONFLICT),
        (&editor, "target@example.com", "viewer", StatusCode::NOT_FOUND),
        (&owner, "target@example.com", "owner", StatusCode::UNPROCESSABLE_ENTITY),
    ];
    for (token, email, role, expected) in cases {
        let response = app
            .request(
                "POST",
                "/note-invitations",
                Some(json!({ "email": email, "note_id": note_id, "role": role })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, expected, "{email} as {role}: {:?}", response.body);
    }
}

#[tokio::test]
async fn test_decline_is_idempotent() {
    let app = TestApp::new();
    let (_, owner) = app.signup("owner@example.com").await;
    let (_, target) = app.signup("target@example.com").await;
    let note_id = app.create_note(&owner, "Plans").await;
    let id = app.invite(&owner, &note_id, "target@example.com", "editor").await;
    let path = format!("/note-invitations/{id}");

    for _ in 0..2 {
        let declined = app
            .request("PATCH", &path, Some(json!({ "accept": false })), Some(&target))
            .await;
        assert_eq!(declined.status, StatusCode::OK);
        assert_eq!(declined.message(), "Invitation declined.");
    }

    let accepted = app
        .request("PATCH", &path, Some(json!({ "accept": true })), Some(&target))
        .await;
    assert_eq!(accepted.status, StatusCode::NOT_FOUND);
    assert_eq!(accepted.message(), "Invitation not found.");

    let note = app
        .request("GET", &format!("/notes/{note_id}"), None, Some(&target))
        .await;
    assert_eq!(note.status, StatusCode::NOT_FOUND);

    // A declined invitation does not block a fresh one.
    app.invite(&owner, &note_id, "target@example.com", "viewer").await;
}

#[tokio::test]
async fn test_only_the_invitee_can_accept() {
    let app = TestApp::new();
    let (_, owner) = app.signup("owner@example.com").await;
    let (_, outsider) = app.signup("outsider@example.com").await;
    app.register("target@example.com").await;
    let note_id = app.create_note(&owner, "Plans").await;
    let id = app.invite(&owner, &note_id, "target@example.com", "editor").await;

    let response = app
        .request(
            "PATCH",
            &format!("/note-invitations/{id}"),
            Some(json!({ "accept": true })),
            Some(&outsider),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let note = app
        .request("GET", &format!("/notes/{note_id}"), None, Some(&outsider))
        .await;
    assert_eq!(note.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_respond_requires_accept_flag() {
    let app = TestApp::new();
    let (_, token) = app.signup("target@example.com").await;
    let response = app
        .request(
            "PATCH",
            "/note-invitations/0190b5a8-0000-7000-8000-000000000000",
            Some(json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
