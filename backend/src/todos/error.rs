//! Error types for the todo service

use thiserror::Error;

use crate::attachment_storage::AttachmentStorageError;
use todo_storage::todo_item::TodoItemStorageError;

/// Result type for todo service operations
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Errors surfaced by the todo service
///
/// `NotFound` is the only application-level failure; storage and
/// attachment errors propagate opaquely and render as server errors at
/// the HTTP boundary.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// No item exists for the addressed `(owner, todo id)` pair
    #[error("TODO not found")]
    NotFound,

    /// Item store failure
    #[error(transparent)]
    Storage(#[from] TodoItemStorageError),

    /// Attachment storage failure
    #[error(transparent)]
    Attachment(#[from] AttachmentStorageError),
}
