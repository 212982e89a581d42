//! Todo Backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// S3 attachment storage operations
pub mod attachment_storage;

/// Middleware modules
pub mod middleware;

/// Route handlers
pub mod routes;

/// Server bootstrap
pub mod server;

/// Todo business logic
pub mod todos;

/// Shared types: environment, errors
pub mod types;
