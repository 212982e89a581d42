//! Todo CRUD and attachment routes

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use axum_valid::Valid;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::instrument;

use crate::{
    middleware::AuthenticatedUser,
    todos::{CreateTodoRequest, TodoService, UpdateTodoRequest},
    types::AppError,
};
use todo_storage::todo_item::TodoItem;

/// Response when listing todo items
#[derive(Debug, Serialize, JsonSchema)]
pub struct TodoListResponse {
    /// All items of the requesting owner, oldest first
    pub items: Vec<TodoItem>,
}

/// Response when creating a todo item
#[derive(Debug, Serialize, JsonSchema)]
pub struct CreateTodoResponse {
    /// The fully materialized new item
    pub item: TodoItem,
}

/// Response when requesting an attachment upload URL
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Presigned URL to upload the attachment to S3
    pub upload_url: String,
    /// ISO-8601 UTC timestamp when the presigned URL expires
    pub expires_at: String,
}

/// List all todo items of the authenticated owner
///
/// # Returns
///
/// Returns `200 OK` with the owner's items ordered by creation time
/// ascending; an owner with no items gets an empty list.
///
/// # Errors
///
/// - `401 UNAUTHORIZED` - Invalid or missing authentication
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
#[instrument(skip(todo_service))]
pub async fn get_todos(
    user: AuthenticatedUser,
    Extension(todo_service): Extension<Arc<TodoService>>,
) -> Result<Json<TodoListResponse>, AppError> {
    let items = todo_service.list_for_owner(&user.owner_id).await?;

    Ok(Json(TodoListResponse { items }))
}

/// Create a new todo item
///
/// # Arguments
///
/// * `user` - The authenticated owner
/// * `payload` - Request containing the name and an optional due date
///
/// # Returns
///
/// Returns `201 CREATED` with the full item, including the generated
/// `todoId` and `createdAt`.
///
/// # Errors
///
/// - `400 BAD_REQUEST` - Invalid request parameters
/// - `401 UNAUTHORIZED` - Invalid or missing authentication
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
#[instrument(skip(todo_service, payload))]
pub async fn create_todo(
    user: AuthenticatedUser,
    Extension(todo_service): Extension<Arc<TodoService>>,
    Valid(Json(payload)): Valid<Json<CreateTodoRequest>>,
) -> Result<(StatusCode, Json<CreateTodoResponse>), AppError> {
    let item = todo_service.create(&user.owner_id, payload).await?;

    Ok((StatusCode::CREATED, Json(CreateTodoResponse { item })))
}

/// Update an existing todo item
///
/// Overwrites name, due date and done; all three fields are required.
///
/// # Arguments
///
/// * `user` - The authenticated owner
/// * `todo_id` - Path parameter addressing the item
/// * `payload` - Request containing the replacement field values
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// - `400 BAD_REQUEST` - Invalid request parameters
/// - `401 UNAUTHORIZED` - Invalid or missing authentication
/// - `404 NOT_FOUND` - No item with the given ID exists for this owner
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
#[instrument(skip(todo_service, payload))]
pub async fn update_todo(
    user: AuthenticatedUser,
    Path(todo_id): Path<String>,
    Extension(todo_service): Extension<Arc<TodoService>>,
    Valid(Json(payload)): Valid<Json<UpdateTodoRequest>>,
) -> Result<StatusCode, AppError> {
    todo_service
        .update(&user.owner_id, &todo_id, payload)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an existing todo item
///
/// Hard delete; the id is gone afterwards and a repeated delete yields
/// `404`.
///
/// # Arguments
///
/// * `user` - The authenticated owner
/// * `todo_id` - Path parameter addressing the item
///
/// # Returns
///
/// Returns `204 NO_CONTENT`
///
/// # Errors
///
/// - `401 UNAUTHORIZED` - Invalid or missing authentication
/// - `404 NOT_FOUND` - No item with the given ID exists for this owner
/// - `500 INTERNAL_SERVER_ERROR` - Storage operation fails
#[instrument(skip(todo_service))]
pub async fn delete_todo(
    user: AuthenticatedUser,
    Path(todo_id): Path<String>,
    Extension(todo_service): Extension<Arc<TodoService>>,
) -> Result<StatusCode, AppError> {
    todo_service.delete(&user.owner_id, &todo_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Request a presigned upload URL for the item's attachment
///
/// Every call mints a fresh upload URL. The first call on an item without
/// an attachment also records the item's public download URL.
///
/// # Arguments
///
/// * `user` - The authenticated owner
/// * `todo_id` - Path parameter addressing the item
///
/// # Returns
///
/// Returns `200 OK` with the upload URL and its expiry timestamp
///
/// # Errors
///
/// - `401 UNAUTHORIZED` - Invalid or missing authentication
/// - `404 NOT_FOUND` - No item with the given ID exists for this owner
/// - `500 INTERNAL_SERVER_ERROR` - Storage or presigning failure
#[instrument(skip(todo_service))]
pub async fn create_attachment_url(
    user: AuthenticatedUser,
    Path(todo_id): Path<String>,
    Extension(todo_service): Extension<Arc<TodoService>>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let presigned_url = todo_service
        .create_attachment_upload_url(&user.owner_id, &todo_id)
        .await?;

    Ok(Json(UploadUrlResponse {
        upload_url: presigned_url.url,
        expires_at: presigned_url.expires_at.to_rfc3339(),
    }))
}
