//! Integration tests for note CRUD and access hiding.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_owner_crud() {
    let app = TestApp::new();
    let (owner_id, token) = app.signup("owner@example.com").await;
    let note_id = app.create_note(&token, "Groceries").await;

    let fetched = app
        .request("GET", &format!("/notes/{note_id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["title"], "Groceries");
    assert_eq!(fetched.body["data"]["user_id"], owner_id.as_str());
    assert_eq!(fetched.body["data"]["role"], "owner");

    for method in ["PUT", "PATCH"] {
        let updated = app
            .request(
                method,
                &format!("/notes/{note_id}"),
                Some(json!({ "title": "Groceries v2", "content": "milk" })),
                Some(&token),
            )
            .await;
        assert_eq!(updated.status, StatusCode::OK, "{method}");
        assert_eq!(updated.body["data"]["content"], "milk");
    }

    let deleted = app
        .request("DELETE", &format!("/notes/{note_id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/notes/{note_id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stranger_gets_not_found_not_forbidden() {
    let app = TestApp::new();
    let (_, owner) = app.signup("owner@example.com").await;
    let (_, stranger) = app.signup("stranger@example.com").await;
    let note_id = app.create_note(&owner, "Private").await;
    let path = format!("/notes/{note_id}");

    let body = json!({ "title": "Hijacked" });
    for (method, body) in [("GET", None), ("PUT", Some(body.clone())), ("PATCH", Some(body)), ("DELETE", None)] {
        let response = app.request(method, &path, body, Some(&stranger)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(response.message(), "Note not found.");
    }

    let missing = app
        .request(
            "GET",
            "/notes/0190b5a8-0000-7000-8000-000000000000",
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Note not found.");

    let listed = app.request("GET", "/notes", None, Some(&stranger)).await;
    assert_eq!(listed.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_requires_session() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/notes", Some(json!({ "title": "x" })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_input_validation() {
    let app = TestApp::new();
    let (_, token) = app.signup("owner@example.com").await;

    let empty_title = app
        .request("POST", "/notes", Some(json!({ "title": "" })), Some(&token))
        .await;
    assert_eq!(empty_title.status, StatusCode::UNPROCESSABLE_ENTITY);

    let long_title = app
        .request(
            "POST",
            "/notes",
            Some(json!({ "title": "t".repeat(301) })),
            Some(&token),
        )
        .await;
    assert_eq!(long_title.status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_id = app.request("GET", "/notes/not-a-uuid", None, Some(&token)).await;
    assert_eq!(bad_id.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_filters_sorts_and_pages() {
    let app = TestApp::new();
    let (_, token) = app.signup("owner@example.com").await;
    for title in ["Charlie", "alpha", "Bravo", "Alphabet soup"] {
        app.create_note(&token, title).await;
    }

    let searched = app
        .request("GET", "/notes?q=ALPHA&sort=title&order=asc", None, Some(&token))
        .await;
    assert_eq!(searched.status, StatusCode::OK);
    assert_eq!(searched.body["data"]["total_items"], 2);
    assert_eq!(searched.body["data"]["items"][0]["role"], "owner");

    let paged = app
        .request("GET", "/notes?page=2&page_size=3", None, Some(&token))
        .await;
    assert_eq!(paged.body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(paged.body["data"]["total_pages"], 2);
    assert_eq!(paged.body["data"]["has_previous"], true);

    for query in ["sort=password", "order=sideways", "page=0", "page_size=101"] {
        let rejected = app
            .request("GET", &format!("/notes?{query}"), None, Some(&token))
            .await;
        assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY, "{query}");
    }
}
