//! Error types for todo item storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{
    delete_item::DeleteItemError, get_item::GetItemError, put_item::PutItemError,
    query::QueryError, update_item::UpdateItemError,
};
use thiserror::Error;

/// Result type alias for storage operations
pub type TodoItemStorageResult<T> = Result<T, TodoItemStorageError>;

/// Storage error types for todo item operations
#[derive(Debug, Error)]
pub enum TodoItemStorageError {
    /// Failed to insert todo item into `DynamoDB`
    #[error("Failed to insert todo item into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to get todo item from `DynamoDB`
    #[error("Failed to get todo item from DynamoDB: {0:?}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to query todo items from `DynamoDB`
    #[error("Failed to query todo items from DynamoDB: {0:?}")]
    DynamoDbQueryError(#[from] SdkError<QueryError>),

    /// Failed to update todo item in `DynamoDB`
    #[error("Failed to update todo item in DynamoDB: {0:?}")]
    DynamoDbUpdateError(#[from] SdkError<UpdateItemError>),

    /// Failed to delete todo item from `DynamoDB`
    #[error("Failed to delete todo item from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// Failed to parse todo item from a `DynamoDB` item
    #[error("Failed to parse todo item: {0}")]
    SerializationError(String),
}
