//! Handler functions for diet meal record API endpoints.
//!
//! Reads are public, including the per-user listing; mutations require an
//! authenticated session and ownership of the record.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::AuthUser;
use crate::database::models::{CreateDietMeal, DietMeal};
use crate::services::meal_service::MealService;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Lists diet meal records.
#[axum::debug_handler]
pub async fn get_meals(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<DietMeal>>>, (StatusCode, String)> {
    let service = MealService::new(&pool);
    let meals = service.get_meals().await.map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        meals,
        "Meals retrieved successfully",
    )))
}

/// Retrieves a single diet meal record.
#[axum::debug_handler]
pub async fn get_meal_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DietMeal>>, (StatusCode, String)> {
    let service = MealService::new(&pool);
    let meal = service
        .get_meal_required(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        meal,
        "Meal retrieved successfully",
    )))
}

/// Lists all diet meal records for a user.
#[axum::debug_handler]
pub async fn get_meals_by_user(
    Extension(pool): Extension<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<DietMeal>>>, (StatusCode, String)> {
    let service = MealService::new(&pool);
    let meals = service
        .get_meals_by_user(user_id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        meals,
        "Meals retrieved successfully",
    )))
}

/// Creates a new diet meal record owned by the authenticated identity.
#[axum::debug_handler]
pub async fn create_meal(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Json(payload): Json<CreateDietMeal>,
) -> Result<(StatusCode, Json<ApiResponse<DietMeal>>), (StatusCode, String)> {
    let service = MealService::new(&pool);
    let meal = service
        .create_meal(payload, &identity)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(meal, "Meal created successfully")),
    ))
}

/// Updates a diet meal record.
#[axum::debug_handler]
pub async fn update_meal(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateDietMeal>,
) -> Result<Json<ApiResponse<DietMeal>>, (StatusCode, String)> {
    let service = MealService::new(&pool);
    let meal = service
        .update_meal(id, payload, &identity)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(meal, "Meal updated successfully")))
}

/// Deletes a diet meal record.
#[axum::debug_handler]
pub async fn delete_meal(
    Extension(pool): Extension<SqlitePool>,
    Extension(identity): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<serde_json::Value>>, (StatusCode, String)> {
    let service = MealService::new(&pool);
    service
        .delete_meal(id, &identity)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({}),
        "Meal deleted successfully",
    )))
}
