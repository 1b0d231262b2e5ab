//! Diet meal record API endpoints.

pub mod handlers;
pub mod routes;
