//! HTTP-level tests for the todo API
//!
//! These drive the real router with an in-memory item store; presigned
//! URL generation runs against a statically configured S3 client and
//! needs no network access.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{test_router, InMemoryTodoStore, TEST_BUCKET};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const OWNER: &str = "auth0|user-1";

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    owner: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {owner}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level");

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Validation rejections are plain text; everything else is JSON
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

async fn create_todo(router: &Router, owner: &str, body: Value) -> Value {
    let (status, json) = send(router, "POST", "/v1/todos", Some(owner), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["item"].clone()
}

async fn list_todos(router: &Router, owner: &str) -> Vec<Value> {
    let (status, json) = send(router, "GET", "/v1/todos", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    json["items"].as_array().expect("items should be an array").clone()
}

#[tokio::test]
async fn test_list_is_empty_for_unknown_owner() {
    let router = test_router(InMemoryTodoStore::new());

    let items = list_todos(&router, OWNER).await;

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_create_returns_materialized_item() {
    let router = test_router(InMemoryTodoStore::new());

    let item = create_todo(
        &router,
        OWNER,
        json!({ "name": "Buy milk", "dueDate": "2024-01-01" }),
    )
    .await;

    assert_eq!(item["name"], "Buy milk");
    assert_eq!(item["dueDate"], "2024-01-01");
    assert_eq!(item["done"], false);
    assert_eq!(item["userId"], OWNER);
    // UUID v4 in canonical form
    assert_eq!(item["todoId"].as_str().unwrap().len(), 36);
    assert!(!item["createdAt"].as_str().unwrap().is_empty());
    // No attachment until the first upload URL is requested
    assert!(item.get("attachmentUrl").is_none());
}

#[tokio::test]
async fn test_create_without_due_date() {
    let router = test_router(InMemoryTodoStore::new());

    let item = create_todo(&router, OWNER, json!({ "name": "Water plants" })).await;

    assert_eq!(item["name"], "Water plants");
    assert!(item.get("dueDate").is_none());
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let router = test_router(InMemoryTodoStore::new());

    let created = create_todo(
        &router,
        OWNER,
        json!({ "name": "Buy milk", "dueDate": "2024-01-01" }),
    )
    .await;

    let items = list_todos(&router, OWNER).await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0], created);
}

#[tokio::test]
async fn test_list_is_ordered_with_unique_ids() {
    let router = test_router(InMemoryTodoStore::new());

    for name in ["first", "second", "third"] {
        create_todo(&router, OWNER, json!({ "name": name })).await;
    }

    let items = list_todos(&router, OWNER).await;
    assert_eq!(items.len(), 3);

    let ids: Vec<&str> = items.iter().map(|i| i["todoId"].as_str().unwrap()).collect();
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), 3, "todo ids must be unique");

    let created: Vec<&str> = items
        .iter()
        .map(|i| i["createdAt"].as_str().unwrap())
        .collect();
    assert!(
        created.windows(2).all(|w| w[0] <= w[1]),
        "items must be ordered by createdAt ascending"
    );
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let router = test_router(InMemoryTodoStore::new());

    create_todo(&router, OWNER, json!({ "name": "Mine" })).await;

    let items = list_todos(&router, "auth0|user-2").await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_update_overwrites_all_three_fields() {
    let router = test_router(InMemoryTodoStore::new());

    let created = create_todo(
        &router,
        OWNER,
        json!({ "name": "Buy milk", "dueDate": "2024-01-01" }),
    )
    .await;
    let todo_id = created["todoId"].as_str().unwrap();

    let (status, _) = send(
        &router,
        "PATCH",
        &format!("/v1/todos/{todo_id}"),
        Some(OWNER),
        Some(json!({ "name": "Buy oat milk", "dueDate": "2024-02-01", "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let items = list_todos(&router, OWNER).await;
    assert_eq!(items[0]["name"], "Buy oat milk");
    assert_eq!(items[0]["dueDate"], "2024-02-01");
    assert_eq!(items[0]["done"], true);
    // Server-assigned fields survive the update
    assert_eq!(items[0]["todoId"], created["todoId"]);
    assert_eq!(items[0]["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() {
    let router = test_router(InMemoryTodoStore::new());

    let (status, body) = send(
        &router,
        "PATCH",
        "/v1/todos/does-not-exist",
        Some(OWNER),
        Some(json!({ "name": "X", "dueDate": "2024-02-01", "done": false })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "TODO not found" }));

    // The failed update must not have materialized anything
    assert!(list_todos(&router, OWNER).await.is_empty());
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let router = test_router(InMemoryTodoStore::new());

    let created = create_todo(&router, OWNER, json!({ "name": "Buy milk" })).await;
    let todo_id = created["todoId"].as_str().unwrap();
    let uri = format!("/v1/todos/{todo_id}");

    let (status, _) = send(&router, "DELETE", &uri, Some(OWNER), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(list_todos(&router, OWNER).await.is_empty());

    // The id is gone, so the existence check fails the second time
    let (status, body) = send(&router, "DELETE", &uri, Some(OWNER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "TODO not found" }));
}

#[tokio::test]
async fn test_delete_missing_item_is_not_found() {
    let router = test_router(InMemoryTodoStore::new());

    let (status, body) = send(
        &router,
        "DELETE",
        "/v1/todos/does-not-exist",
        Some(OWNER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "TODO not found" }));
}

#[tokio::test]
async fn test_first_attachment_call_sets_download_url_once() {
    let router = test_router(InMemoryTodoStore::new());

    let created = create_todo(&router, OWNER, json!({ "name": "Buy milk" })).await;
    let todo_id = created["todoId"].as_str().unwrap().to_string();
    let uri = format!("/v1/todos/{todo_id}/attachment");

    let (status, body) = send(&router, "POST", &uri, Some(OWNER), None).await;
    assert_eq!(status, StatusCode::OK);
    let upload_url = body["uploadUrl"].as_str().unwrap();
    assert!(upload_url.contains(TEST_BUCKET));
    assert!(upload_url.contains(&todo_id));
    assert!(upload_url.contains("X-Amz-Signature="));
    assert!(!body["expiresAt"].as_str().unwrap().is_empty());

    // The download URL is deterministic and was persisted on the item
    let expected_download_url = format!("https://{TEST_BUCKET}.s3.amazonaws.com/{todo_id}");
    let items = list_todos(&router, OWNER).await;
    assert_eq!(items[0]["attachmentUrl"], json!(expected_download_url));

    // A second call still yields a fresh upload URL but leaves the
    // download URL untouched
    let (status, body) = send(&router, "POST", &uri, Some(OWNER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["uploadUrl"].as_str().unwrap().contains(&todo_id));

    let items = list_todos(&router, OWNER).await;
    assert_eq!(items[0]["attachmentUrl"], json!(expected_download_url));
}

#[tokio::test]
async fn test_attachment_for_missing_item_is_not_found() {
    let router = test_router(InMemoryTodoStore::new());

    let (status, body) = send(
        &router,
        "POST",
        "/v1/todos/does-not-exist/attachment",
        Some(OWNER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "TODO not found" }));
}

#[tokio::test]
async fn test_requests_without_bearer_token_are_rejected() {
    let router = test_router(InMemoryTodoStore::new());

    let (status, body) = send(&router, "GET", "/v1/todos", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("Bearer"));
}

#[tokio::test]
async fn test_create_with_empty_name_is_rejected() {
    let router = test_router(InMemoryTodoStore::new());

    let (status, _) = send(
        &router,
        "POST",
        "/v1/todos",
        Some(OWNER),
        Some(json!({ "name": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(list_todos(&router, OWNER).await.is_empty());
}

#[tokio::test]
async fn test_health_is_public() {
    let router = test_router(InMemoryTodoStore::new());

    let (status, body) = send(&router, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
