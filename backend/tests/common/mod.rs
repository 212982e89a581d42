//! Shared test utilities: an in-memory item store and a router factory

use std::sync::{Arc, Mutex};

use aide::openapi::OpenApi;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use axum::{Extension, Router};
use todo_backend::{
    attachment_storage::AttachmentStorage, routes, todos::TodoService, types::Environment,
};
use todo_storage::todo_item::{
    TodoItem, TodoItemStorageResult, TodoItemStore, TodoItemUpdate,
};

pub const TEST_BUCKET: &str = "todo-attachments";

/// In-memory item store with the same contract as the DynamoDB one
#[derive(Default)]
pub struct InMemoryTodoStore {
    items: Mutex<Vec<TodoItem>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl TodoItemStore for InMemoryTodoStore {
    async fn list_for_owner(&self, owner_id: &str) -> TodoItemStorageResult<Vec<TodoItem>> {
        let items = self.items.lock().unwrap();
        let mut owned: Vec<TodoItem> = items
            .iter()
            .filter(|item| item.user_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(owned)
    }

    async fn get_by_id(
        &self,
        owner_id: &str,
        todo_id: &str,
    ) -> TodoItemStorageResult<Option<TodoItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|item| item.user_id == owner_id && item.todo_id == todo_id)
            .cloned())
    }

    async fn insert(&self, item: &TodoItem) -> TodoItemStorageResult<()> {
        let mut items = self.items.lock().unwrap();
        // Unconditional put: overwrite on key collision
        items.retain(|i| !(i.user_id == item.user_id && i.todo_id == item.todo_id));
        items.push(item.clone());
        Ok(())
    }

    async fn update_fields(
        &self,
        owner_id: &str,
        todo_id: &str,
        update: &TodoItemUpdate,
    ) -> TodoItemStorageResult<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items
            .iter_mut()
            .find(|item| item.user_id == owner_id && item.todo_id == todo_id)
        {
            item.name = update.name.clone();
            item.due_date = Some(update.due_date.clone());
            item.done = update.done;
        }
        Ok(())
    }

    async fn set_attachment_url(
        &self,
        owner_id: &str,
        todo_id: &str,
        attachment_url: &str,
    ) -> TodoItemStorageResult<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items
            .iter_mut()
            .find(|item| item.user_id == owner_id && item.todo_id == todo_id)
        {
            item.attachment_url = Some(attachment_url.to_string());
        }
        Ok(())
    }

    async fn delete(&self, owner_id: &str, todo_id: &str) -> TodoItemStorageResult<()> {
        let mut items = self.items.lock().unwrap();
        items.retain(|item| !(item.user_id == owner_id && item.todo_id == todo_id));
        Ok(())
    }
}

/// Attachment storage against a statically configured S3 client; presigning
/// is local, so no network access is needed
pub fn test_attachment_storage() -> Arc<AttachmentStorage> {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::from_keys("test", "test", None))
        .build();

    Arc::new(AttachmentStorage::new(
        Arc::new(S3Client::from_conf(config)),
        TEST_BUCKET.to_string(),
        300,
    ))
}

/// Builds the full application router around the given store
pub fn test_router(store: Arc<InMemoryTodoStore>) -> Router {
    let todo_service = Arc::new(TodoService::new(store, test_attachment_storage()));

    let mut openapi = OpenApi::default();
    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(Environment::Development {
            presign_expiry_override: None,
        }))
        .layer(Extension(todo_service))
}
