//! Defines the HTTP routes for user profile and management.
//!
//! All user routes require an authenticated session; the service layer
//! additionally restricts mutations to the owning identity.

use super::handlers::{delete_user, get_user_by_id, update_username};
use crate::auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/{id}", get(get_user_by_id))
        .route("/{id}", put(update_username))
        .route("/{id}", delete(delete_user))
        .layer(middleware::from_fn(require_auth))
}
