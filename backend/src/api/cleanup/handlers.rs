//! Handler functions for cleanup record API endpoints.
//!
//! Reads are public; create, update and delete require an authenticated
//! session, and update/delete additionally require ownership (enforced in
//! the service layer, existence checked first).

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::AuthUser;
use crate::database::models::{Cleanup, CreateCleanup};
use crate::services::cleanup_service::CleanupService;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use sqlx::SqlitePool;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional cap on the number of records returned, newest first.
    pub limit: Option<i64>,
}

/// Lists cleanup records.
#[axum::debug_handler]
pub async fn get_cleanups(
    Extension(pool): Extension<SqlitePool>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Cleanup>>>, (StatusCode, String)> {
    let service = CleanupService::new(&pool);
    let cleanups = service
        .get_cleanups(query.limit)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        cleanups,
        "Cleanups retrieved successfully",
    )))
}

/// Retrieves a single cleanup record.
#[axum::debug_handler]
pub async fn get_cleanup_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Cleanup>>, (StatusCode, String)> {
    let service = CleanupService::new(&pool);
    let cleanup = service
        .get_cleanup_required(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        cleanup,
        "Cleanup retrieved successfully",
    )))
}

/// Creates a new cleanup record owned by the authenticated identity.
#[axum::debug_handler]
pub async fn create_cleanup(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Json(payload): Json<CreateCleanup>,
) -> Result<(StatusCode, Json<ApiResponse<Cleanup>>), (StatusCode, String)> {
    let service = CleanupService::new(&pool);
    let cleanup = service
        .create_cleanup(payload, &identity)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(cleanup, "Cleanup created successfully")),
    ))
}

/// Updates a cleanup record.
#[axum::debug_handler]
pub async fn update_cleanup(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCleanup>,
) -> Result<Json<ApiResponse<Cleanup>>, (StatusCode, String)> {
    let service = CleanupService::new(&pool);
    let cleanup = service
        .update_cleanup(id, payload, &identity)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        cleanup,
        "Cleanup updated successfully",
    )))
}

/// Deletes a cleanup record.
#[axum::debug_handler]
pub async fn delete_cleanup(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    let service = CleanupService::new(&pool);
    service
        .delete_cleanup(id, &identity)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({}),
        "Cleanup deleted successfully",
    )))
}
