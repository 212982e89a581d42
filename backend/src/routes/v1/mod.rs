//! Version 1 of the API

pub mod todos;

use aide::axum::{
    routing::{get, patch, post},
    ApiRouter,
};
use axum::middleware;

use crate::middleware::auth::auth_middleware;

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/todos", get(todos::get_todos).post(todos::create_todo))
        .api_route(
            "/todos/{todoId}",
            patch(todos::update_todo).delete(todos::delete_todo),
        )
        .api_route(
            "/todos/{todoId}/attachment",
            post(todos::create_attachment_url),
        )
        .layer(middleware::from_fn(auth_middleware))
}
