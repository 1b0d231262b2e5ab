//! Defines the HTTP routes for diet meal records.
//!
//! Reads are public; mutations are layered behind the auth middleware.

use super::handlers::*;
use crate::auth::middleware::require_auth;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn meal_router() -> Router {
    let public = Router::new()
        .route("/meals", get(get_meals))
        .route("/meals/{id}", get(get_meal_by_id))
        .route("/meals/user/{id}", get(get_meals_by_user));

    let protected = Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/{id}", put(update_meal).delete(delete_meal))
        .layer(middleware::from_fn(require_auth));

    public.merge(protected)
}
