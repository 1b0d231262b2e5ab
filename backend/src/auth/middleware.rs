//! Middleware for protecting authenticated routes and handling authorization.
//!
//! Each protected request is a single pass: extract the bearer header, verify
//! the access token, then re-validate the subject against the user store so
//! tokens of deleted users stop working. The resolved identity is attached to
//! request extensions; nothing is cached across requests.

use crate::api::common::error_response;
use crate::auth::models::AuthUser;
use crate::config::Config;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{TokenError, TokenIssuer, TokenType};
use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

/// Access token authentication middleware
pub async fn require_auth(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = auth_header
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| {
            error_response(
                StatusCode::UNAUTHORIZED,
                "Not authorized. No token.",
                "unauthorized",
            )
        })?;

    let issuer = TokenIssuer::new(&config);
    let claims = issuer
        .verify(token, TokenType::Access)
        .map_err(|e| {
            let message = match e {
                TokenError::Expired => "Token expired",
                TokenError::Malformed => "Invalid token",
                TokenError::WrongType => "Invalid token type",
            };
            error_response(StatusCode::UNAUTHORIZED, message, "unauthorized")
        })?;

    // One registry lookup per request: the token may outlive its user.
    let users = UserRepository::new(&pool);
    let user = users.get_user_by_id(claims.sub).await.map_err(|e| {
        tracing::error!("User lookup failed during authentication: {}", e);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "internal_error",
        )
    })?;

    let Some(user) = user else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "User not found",
            "unauthorized",
        ));
    };

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
        email: user.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateUser;
    use crate::database::test_pool;
    use crate::utils::jwt::Claims;
    use axum::{Router, body::Body, middleware, routing::get};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use tower::ServiceExt;

    async fn identity(Extension(user): Extension<AuthUser>) -> String {
        user.username
    }

    async fn protected_app() -> (Router, SqlitePool, Config) {
        let pool = test_pool().await;
        let config = Config::for_tests();
        let app = Router::new()
            .route(
                "/protected",
                get(identity).layer(middleware::from_fn(require_auth)),
            )
            .layer(Extension(pool.clone()))
            .layer(Extension(config.clone()));
        (app, pool, config)
    }

    async fn insert_user(pool: &SqlitePool) -> i64 {
        UserRepository::new(pool)
            .create_user(CreateUser {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "irrelevant".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn request(app: Router, header: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (app, _pool, _config) = protected_app().await;
        let (status, body) = request(app, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Not authorized. No token."));
    }

    #[tokio::test]
    async fn non_bearer_header_is_rejected() {
        let (app, _pool, _config) = protected_app().await;
        let (status, body) = request(app, Some("Token abc")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Not authorized. No token."));
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let (app, _pool, _config) = protected_app().await;
        let (status, body) = request(app, Some("Bearer not-a-jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token"));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let (app, _pool, config) = protected_app().await;

        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            token_type: TokenType::Access,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let (status, body) = request(app, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Token expired"));
    }

    #[tokio::test]
    async fn refresh_token_cannot_open_a_session() {
        // Shared secret forces the rejection onto the type check.
        let pool = test_pool().await;
        let mut config = Config::for_tests();
        config.jwt_refresh_secret = config.jwt_secret.clone();
        let app = Router::new()
            .route(
                "/protected",
                get(identity).layer(middleware::from_fn(require_auth)),
            )
            .layer(Extension(pool.clone()))
            .layer(Extension(config.clone()));

        let user_id = insert_user(&pool).await;
        let refresh = TokenIssuer::new(&config).issue_refresh(user_id).unwrap();

        let (status, body) = request(app, Some(&format!("Bearer {}", refresh))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token type"));
    }

    #[tokio::test]
    async fn valid_token_for_a_deleted_user_is_rejected() {
        let (app, _pool, config) = protected_app().await;

        // No user with this id exists.
        let token = TokenIssuer::new(&config).issue_access(999).unwrap();

        let (status, body) = request(app, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("User not found"));
    }

    #[tokio::test]
    async fn valid_token_attaches_the_identity() {
        let (app, pool, config) = protected_app().await;

        let user_id = insert_user(&pool).await;
        let token = TokenIssuer::new(&config).issue_access(user_id).unwrap();

        let (status, body) = request(app, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alice");
    }
}
