//! Data structures for authentication-related entities.
//!
//! This module defines request/response models for signup, login and token
//! refresh, plus the per-request identity attached by the auth middleware.

use crate::database::models::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request payload
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        email(message = "Must be a valid email"),
        length(min = 1, message = "Email is required")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User information returned in auth responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Outcome of a successful signup, login or refresh. The refresh token goes
/// into the cookie; only the access token reaches the response body.
#[derive(Debug)]
pub struct AuthSession {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of signup/login/refresh responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub access_token: String,
}

/// Verified identity attached to request extensions by `require_auth`.
/// Reconstructed per request from the access token and a registry lookup;
/// never cached across requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Request body for the username update endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsernameRequest {
    #[validate(length(min = 1, max = 255, message = "Username is required"))]
    pub username: String,
}
