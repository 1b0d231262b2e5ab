//! User profile API endpoints.

pub mod handlers;
pub mod routes;
