//! Main entry point for the EcoTrack backend.
//!
//! This file initializes the Axum web server, sets up the database pool,
//! runs migrations and registers all API routes and middleware.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use axum::{Extension, Router, http::StatusCode, response::Json, routing::get};
use config::Config;
use database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    db.migrate().await.unwrap();
    let pool = db.pool().clone();

    let app = Router::new()
        .route("/api", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .nest("/api/cleanups", api::cleanup::routes::cleanup_router())
        .nest("/api/diet", api::meal::routes::meal_router())
        .nest("/api/user", api::user::routes::user_router())
        .fallback(not_found_handler)
        .layer(Extension(pool))
        .layer(Extension(config.clone()));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting EcoTrack server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "EcoTrack Backend",
            "version": "0.1.0"
        }),
        "Welcome to the EcoTrack API",
    ))
}

async fn not_found_handler() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Route not found", "not_found", None)),
    )
}
