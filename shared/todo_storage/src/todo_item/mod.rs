//! Todo item storage module for `DynamoDB` operations
//!
//! One table holds all todo items, partitioned by owner and item-addressed
//! by item id. A local secondary index keyed by creation time backs the
//! owner-scoped listing.

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
pub use error::{TodoItemStorageError, TodoItemStorageResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_item, to_item};
use strum::Display;

/// A single todo item
///
/// `(user_id, todo_id)` uniquely identifies an item. `todo_id` is assigned
/// by the service at creation and never changes; `created_at` is set once,
/// server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Owner of the item (Primary Key)
    pub user_id: String,

    /// Unique item ID, UUID v4 (Sort Key)
    pub todo_id: String,

    /// User-supplied title
    pub name: String,

    /// Optional due date (ISO-8601 date string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Completion flag
    pub done: bool,

    /// Creation timestamp (ISO-8601 UTC), immutable after creation
    pub created_at: String,

    /// Public read URL of the uploaded attachment, absent until the first
    /// upload URL is requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

/// Full replacement of the three mutable fields of a todo item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemUpdate {
    /// New title
    pub name: String,

    /// New due date (ISO-8601 date string)
    pub due_date: String,

    /// New completion flag
    pub done: bool,
}

/// `DynamoDB` attribute names for the todo item table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "camelCase")]
pub enum TodoItemAttribute {
    /// Owner (Primary Key)
    UserId,
    /// Item ID (Sort Key)
    TodoId,
    /// Title (reserved word in `DynamoDB`, always aliased in expressions)
    Name,
    /// Due date
    DueDate,
    /// Completion flag
    Done,
    /// Creation timestamp (sort key of the listing index)
    CreatedAt,
    /// Attachment read URL
    AttachmentUrl,
}

/// Store contract for todo items
///
/// The `DynamoDB` implementation is [`TodoItemStorage`]; the service layer
/// only depends on this trait so it can run against an in-memory store in
/// tests.
#[async_trait]
pub trait TodoItemStore: Send + Sync {
    /// Returns all items for the owner, ordered by creation time ascending.
    /// Empty when the owner has none. The full result set is returned in
    /// one call; listings are not paginated.
    async fn list_for_owner(&self, owner_id: &str) -> TodoItemStorageResult<Vec<TodoItem>>;

    /// Point lookup; `None` (not an error) when no such item exists
    async fn get_by_id(
        &self,
        owner_id: &str,
        todo_id: &str,
    ) -> TodoItemStorageResult<Option<TodoItem>>;

    /// Unconditional write; overwrites any existing item with the same key.
    /// Key uniqueness is the caller's responsibility.
    async fn insert(&self, item: &TodoItem) -> TodoItemStorageResult<()>;

    /// Unconditional overwrite of name, due date and done. Callers must
    /// verify the item exists first; the update is not conditional on the
    /// key being present.
    async fn update_fields(
        &self,
        owner_id: &str,
        todo_id: &str,
        update: &TodoItemUpdate,
    ) -> TodoItemStorageResult<()>;

    /// Unconditional overwrite of the attachment URL field only
    async fn set_attachment_url(
        &self,
        owner_id: &str,
        todo_id: &str,
        attachment_url: &str,
    ) -> TodoItemStorageResult<()>;

    /// Removes the item; succeeds even when the key is already absent
    async fn delete(&self, owner_id: &str, todo_id: &str) -> TodoItemStorageResult<()>;
}

/// Todo item storage client for Dynamo DB operations
pub struct TodoItemStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
    created_at_index_name: String,
}

impl TodoItemStorage {
    /// Creates a new todo item storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for todo items
    /// * `created_at_index_name` - Name of the index keyed by creation time
    #[must_use]
    pub const fn new(
        dynamodb_client: Arc<DynamoDbClient>,
        table_name: String,
        created_at_index_name: String,
    ) -> Self {
        Self {
            dynamodb_client,
            table_name,
            created_at_index_name,
        }
    }

    fn item_key(owner_id: &str, todo_id: &str) -> [(String, AttributeValue); 2] {
        [
            (
                TodoItemAttribute::UserId.to_string(),
                AttributeValue::S(owner_id.to_string()),
            ),
            (
                TodoItemAttribute::TodoId.to_string(),
                AttributeValue::S(todo_id.to_string()),
            ),
        ]
    }
}

#[async_trait]
impl TodoItemStore for TodoItemStorage {
    async fn list_for_owner(&self, owner_id: &str) -> TodoItemStorageResult<Vec<TodoItem>> {
        tracing::debug!(owner_id, "Listing todo items");

        let response = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.created_at_index_name)
            .key_condition_expression("#user_id = :user_id")
            .expression_attribute_names("#user_id", TodoItemAttribute::UserId.to_string())
            .expression_attribute_values(":user_id", AttributeValue::S(owner_id.to_string()))
            .scan_index_forward(true)
            .send()
            .await?;

        response
            .items()
            .iter()
            .map(|item| {
                from_item(item.clone())
                    .map_err(|e| TodoItemStorageError::SerializationError(e.to_string()))
            })
            .collect()
    }

    async fn get_by_id(
        &self,
        owner_id: &str,
        todo_id: &str,
    ) -> TodoItemStorageResult<Option<TodoItem>> {
        let mut request = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name);

        for (name, value) in Self::item_key(owner_id, todo_id) {
            request = request.key(name, value);
        }

        let response = request.send().await?;

        response
            .item()
            .map(|item| {
                from_item(item.clone())
                    .map_err(|e| TodoItemStorageError::SerializationError(e.to_string()))
            })
            .transpose()
    }

    async fn insert(&self, item: &TodoItem) -> TodoItemStorageResult<()> {
        let dynamo_item = to_item(item)
            .map_err(|e| TodoItemStorageError::SerializationError(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(dynamo_item))
            .send()
            .await?;

        Ok(())
    }

    async fn update_fields(
        &self,
        owner_id: &str,
        todo_id: &str,
        update: &TodoItemUpdate,
    ) -> TodoItemStorageResult<()> {
        let mut request = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name);

        for (name, value) in Self::item_key(owner_id, todo_id) {
            request = request.key(name, value);
        }

        // "name" is a DynamoDB reserved word
        request
            .update_expression("SET #name = :name, dueDate = :dueDate, done = :done")
            .expression_attribute_names("#name", TodoItemAttribute::Name.to_string())
            .expression_attribute_values(":name", AttributeValue::S(update.name.clone()))
            .expression_attribute_values(":dueDate", AttributeValue::S(update.due_date.clone()))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .send()
            .await?;

        Ok(())
    }

    async fn set_attachment_url(
        &self,
        owner_id: &str,
        todo_id: &str,
        attachment_url: &str,
    ) -> TodoItemStorageResult<()> {
        let mut request = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name);

        for (name, value) in Self::item_key(owner_id, todo_id) {
            request = request.key(name, value);
        }

        request
            .update_expression("SET attachmentUrl = :attachmentUrl")
            .expression_attribute_values(
                ":attachmentUrl",
                AttributeValue::S(attachment_url.to_string()),
            )
            .send()
            .await?;

        Ok(())
    }

    async fn delete(&self, owner_id: &str, todo_id: &str) -> TodoItemStorageResult<()> {
        let mut request = self
            .dynamodb_client
            .delete_item()
            .table_name(&self.table_name);

        for (name, value) in Self::item_key(owner_id, todo_id) {
            request = request.key(name, value);
        }

        request.send().await?;

        Ok(())
    }
}
