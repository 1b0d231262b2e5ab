//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for signup, login, logout
//! and token refresh, parse request data, and interact with the
//! `auth::service` for core business logic. The refresh token is carried
//! exclusively in a protected cookie; response bodies only ever contain the
//! access token.

use crate::api::common::{ApiResponse, error_response, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sqlx::SqlitePool;

pub const REFRESH_COOKIE: &str = "refreshToken";

/// Builds the refresh cookie. Secure and cross-site only in production;
/// relaxed for local development.
fn refresh_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.is_production())
        .same_site(if config.is_production() {
            SameSite::None
        } else {
            SameSite::Lax
        })
        .max_age(time::Duration::days(7))
        .build()
}

/// An already-expired refresh cookie with the same attributes as
/// `refresh_cookie`, so the browser drops the stored one regardless of
/// whether this request carried it.
fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(config.is_production())
        .same_site(if config.is_production() {
            SameSite::None
        } else {
            SameSite::Lax
        })
        .max_age(time::Duration::ZERO)
        .build()
}

/// Unpacks a JSON body, turning deserialization failures (missing fields,
/// malformed JSON) into a 400 in the standard envelope instead of the
/// extractor's plain-text 422.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, (StatusCode, String)> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(error_response(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            "validation_error",
        )),
    }
}

/// Handle user signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    jar: CookieJar,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<AuthResponse>>), (StatusCode, String)> {
    let payload = parse_body(payload)?;
    let auth_service = AuthService::new(&pool, &config);

    let AuthSession {
        user,
        access_token,
        refresh_token,
    } = auth_service
        .signup(payload)
        .await
        .map_err(service_error_to_http)?;

    let jar = jar.add(refresh_cookie(&config, refresh_token));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::success(
            AuthResponse { user, access_token },
            "User account created successfully",
        )),
    ))
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<AuthResponse>>), (StatusCode, String)> {
    let payload = parse_body(payload)?;
    let auth_service = AuthService::new(&pool, &config);

    let AuthSession {
        user,
        access_token,
        refresh_token,
    } = auth_service
        .login(payload)
        .await
        .map_err(service_error_to_http)?;

    let jar = jar.add(refresh_cookie(&config, refresh_token));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::success(
            AuthResponse { user, access_token },
            "User logged in successfully",
        )),
    ))
}

/// Handle logout request. Purely stateless: the refresh cookie is cleared
/// unconditionally, outstanding tokens are not invalidated server-side.
#[axum::debug_handler]
pub async fn logout(
    Extension(config): Extension<Config>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<serde_json::Value>>) {
    let jar = jar.add(removal_cookie(&config));

    (
        jar,
        Json(ApiResponse::success(
            serde_json::json!({}),
            "Logged out successfully",
        )),
    )
}

/// Handle token refresh request. Redeeming a valid refresh token rotates the
/// whole pair and overwrites the cookie.
#[axum::debug_handler]
pub async fn refresh(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<AuthResponse>>), (StatusCode, String)> {
    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "No refresh token provided",
            "unauthorized",
        ));
    };

    let auth_service = AuthService::new(&pool, &config);

    let AuthSession {
        user,
        access_token,
        refresh_token,
    } = auth_service
        .refresh(cookie.value())
        .await
        .map_err(service_error_to_http)?;

    let jar = jar.add(refresh_cookie(&config, refresh_token));

    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::success(
            AuthResponse { user, access_token },
            "Token refreshed successfully",
        )),
    ))
}
