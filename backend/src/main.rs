use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;

use todo_backend::{
    attachment_storage::AttachmentStorage, server, todos::TodoService, types::Environment,
};
use todo_storage::todo_item::TodoItemStorage;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON log output for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let dynamodb_client = Arc::new(DynamoDbClient::from_conf(
        environment.dynamodb_client_config().await,
    ));
    let todo_storage = Arc::new(TodoItemStorage::new(
        dynamodb_client,
        environment.todos_table(),
        environment.created_at_index(),
    ));

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let attachment_storage = Arc::new(AttachmentStorage::new(
        s3_client,
        environment.attachments_bucket(),
        environment.presigned_url_expiry_secs(),
    ));

    let todo_service = Arc::new(TodoService::new(todo_storage, attachment_storage));

    server::start(environment, todo_service).await
}
