//! Todo business logic
//!
//! Orchestrates the item store and the attachment storage to implement the
//! five user-facing operations, enforcing existence checks and populating
//! server-assigned fields.

mod error;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use error::{TodoServiceError, TodoServiceResult};

use crate::attachment_storage::{AttachmentStorage, PresignedUrl};
use todo_storage::todo_item::{TodoItem, TodoItemStore, TodoItemUpdate};

/// Request to create a new todo item
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTodoRequest {
    /// Title of the new item
    #[validate(length(min = 1))]
    pub name: String,

    /// Optional due date (ISO-8601 date string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Request to update an existing todo item
///
/// All three fields are required and overwrite the stored values
/// unconditionally; there is no partial-field update.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTodoRequest {
    /// New title
    #[validate(length(min = 1))]
    pub name: String,

    /// New due date (ISO-8601 date string)
    pub due_date: String,

    /// New completion flag
    pub done: bool,
}

/// Todo service orchestrating storage and attachment operations
///
/// Stateless between calls; one instance is constructed at process start
/// and shared by reference across all requests.
pub struct TodoService {
    todo_storage: Arc<dyn TodoItemStore>,
    attachment_storage: Arc<AttachmentStorage>,
}

impl TodoService {
    /// Creates a new todo service
    #[must_use]
    pub fn new(
        todo_storage: Arc<dyn TodoItemStore>,
        attachment_storage: Arc<AttachmentStorage>,
    ) -> Self {
        Self {
            todo_storage,
            attachment_storage,
        }
    }

    /// Returns all items of the owner, ordered by creation time ascending
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if the item store fails
    pub async fn list_for_owner(&self, owner_id: &str) -> TodoServiceResult<Vec<TodoItem>> {
        Ok(self.todo_storage.list_for_owner(owner_id).await?)
    }

    /// Creates a new todo item and returns the fully materialized record
    ///
    /// The item id is a freshly generated UUID v4, `done` starts false and
    /// `created_at` is the current server time.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if the item store fails
    pub async fn create(
        &self,
        owner_id: &str,
        request: CreateTodoRequest,
    ) -> TodoServiceResult<TodoItem> {
        let item = TodoItem {
            user_id: owner_id.to_string(),
            todo_id: uuid::Uuid::new_v4().to_string(),
            name: request.name,
            due_date: request.due_date,
            done: false,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            attachment_url: None,
        };

        tracing::info!(owner_id, todo_id = %item.todo_id, "Creating todo item");

        self.todo_storage.insert(&item).await?;

        Ok(item)
    }

    /// Overwrites name, due date and done of an existing item
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::NotFound` when the item does not exist
    /// and `TodoServiceError::Storage` if the item store fails
    pub async fn update(
        &self,
        owner_id: &str,
        todo_id: &str,
        request: UpdateTodoRequest,
    ) -> TodoServiceResult<()> {
        self.get_existing(owner_id, todo_id).await?;

        let update = TodoItemUpdate {
            name: request.name,
            due_date: request.due_date,
            done: request.done,
        };

        tracing::info!(owner_id, todo_id, "Updating todo item");

        Ok(self
            .todo_storage
            .update_fields(owner_id, todo_id, &update)
            .await?)
    }

    /// Deletes an existing item (hard delete)
    ///
    /// A repeated delete of the same id fails the existence check and
    /// yields `NotFound` again.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::NotFound` when the item does not exist
    /// and `TodoServiceError::Storage` if the item store fails
    pub async fn delete(&self, owner_id: &str, todo_id: &str) -> TodoServiceResult<()> {
        self.get_existing(owner_id, todo_id).await?;

        tracing::info!(owner_id, todo_id, "Deleting todo item");

        Ok(self.todo_storage.delete(owner_id, todo_id).await?)
    }

    /// Mints a fresh upload URL for the item's attachment
    ///
    /// The first call on an item with no attachment also persists the
    /// deterministic public download URL; later calls leave it untouched
    /// since it is a function of the todo id, not of the content. The
    /// upload URL is returned either way. Nothing verifies that the client
    /// ever performs the upload.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::NotFound` when the item does not exist,
    /// `TodoServiceError::Storage` if the item store fails and
    /// `TodoServiceError::Attachment` if presigning fails
    pub async fn create_attachment_upload_url(
        &self,
        owner_id: &str,
        todo_id: &str,
    ) -> TodoServiceResult<PresignedUrl> {
        let item = self.get_existing(owner_id, todo_id).await?;

        let upload_url = self.attachment_storage.generate_upload_url(todo_id).await?;

        if item.attachment_url.is_none() {
            let download_url = self.attachment_storage.attachment_url(todo_id);
            self.todo_storage
                .set_attachment_url(owner_id, todo_id, &download_url)
                .await?;
        }

        Ok(upload_url)
    }

    /// Existence check backing update, delete and the attachment flow
    async fn get_existing(&self, owner_id: &str, todo_id: &str) -> TodoServiceResult<TodoItem> {
        self.todo_storage
            .get_by_id(owner_id, todo_id)
            .await?
            .ok_or(TodoServiceError::NotFound)
    }
}
