//! Handler functions for user profile and management API endpoints.
//!
//! These functions process requests for user data. Username updates and
//! account deletion are restricted to the owning identity by the service
//! layer.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::{AuthUser, UpdateUsernameRequest, UserInfo};
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let user = user_service
        .get_user_required(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user.into(),
        "User retrieved successfully",
    )))
}

/// Changes a user's username. Self-service only.
#[axum::debug_handler]
pub async fn update_username(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUsernameRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let user = user_service
        .update_username(id, &identity, payload)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!("User {} updated their username", id);
    Ok(Json(ApiResponse::success(
        user.into(),
        "Username updated successfully",
    )))
}

/// Deletes a user account. Self-service only.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    user_service
        .delete_user(id, &identity)
        .await
        .map_err(service_error_to_http)?;

    tracing::info!("User {} deleted their account", id);
    Ok(Json(ApiResponse::success(
        serde_json::json!({}),
        "User deleted successfully",
    )))
}
