//! Defines the HTTP routes for cleanup records.
//!
//! Reads are public; mutations are layered behind the auth middleware.

use super::handlers::*;
use crate::auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn cleanup_router() -> Router {
    let public = Router::new()
        .route("/", get(get_cleanups))
        .route("/{id}", get(get_cleanup_by_id));

    let protected = Router::new()
        .route("/", post(create_cleanup))
        .route("/{id}", put(update_cleanup).delete(delete_cleanup))
        .layer(middleware::from_fn(require_auth));

    public.merge(protected)
}
