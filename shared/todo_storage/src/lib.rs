//! Todo item storage for the todo backend
//!
//! This crate holds the `TodoItem` data model and the Dynamo DB backed
//! item store used by the HTTP service.

pub mod todo_item;
