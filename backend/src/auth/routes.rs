//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user signup, login, logout and token refreshing, and
//! are designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::config::Config;
    use crate::database::test_pool;
    use axum::body::Body;
    use axum::extract::Extension;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let pool = test_pool().await;
        let config = Config::for_tests();
        Router::new()
            .nest("/api/auth", auth_router())
            .nest("/api/user", api::user::routes::user_router())
            .layer(Extension(pool))
            .layer(Extension(config))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn refresh_cookie(response: &axum::response::Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("refresh cookie set")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("refreshToken="));
        assert!(set_cookie.contains("HttpOnly"));
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn signup_login_protected_and_refresh_flow() {
        let app = app().await;

        // Signup: 201, access token in body, refresh token only in the cookie.
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/auth/signup",
                json!({"email": "a@x.com", "username": "alice", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = refresh_cookie(&response);
        let body = read_json(response).await;
        assert_eq!(body["data"]["user"]["id"], 1);
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert!(body["data"]["access_token"].is_string());
        assert!(body["data"].get("refresh_token").is_none());

        // Login with the same credentials.
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/auth/login",
                json!({"email": "a@x.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

        // The access token opens a protected route.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/user/1")
                    .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Without it the same route is a 401.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/user/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Redeem the refresh cookie: fresh pair, rotated cookie.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/refresh")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let _rotated = refresh_cookie(&response);
        let body = read_json(response).await;
        assert!(body["data"]["access_token"].is_string());
    }

    #[tokio::test]
    async fn login_with_bad_credentials_is_a_generic_401() {
        let app = app().await;

        app.clone()
            .oneshot(json_request(
                "/api/auth/signup",
                json!({"email": "a@x.com", "username": "alice", "password": "secret1"}),
            ))
            .await
            .unwrap();

        let wrong_password = app
            .clone()
            .oneshot(json_request(
                "/api/auth/login",
                json!({"email": "a@x.com", "password": "nope"}),
            ))
            .await
            .unwrap();
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        let wrong_password = read_json(wrong_password).await;

        let unknown_email = app
            .clone()
            .oneshot(json_request(
                "/api/auth/login",
                json!({"email": "nobody@x.com", "password": "secret1"}),
            ))
            .await
            .unwrap();
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        let unknown_email = read_json(unknown_email).await;

        assert_eq!(wrong_password["message"], unknown_email["message"]);
        assert_eq!(wrong_password["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn missing_fields_are_a_400_not_an_extractor_422() {
        let app = app().await;

        // Signup body without a password.
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/auth/signup",
                json!({"email": "a@x.com", "username": "alice"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["error_type"], "validation_error");

        // Login body without a password.
        let response = app
            .oneshot(json_request("/api/auth/login", json!({"email": "a@x.com"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_without_cookie_is_401() {
        let app = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_with_an_access_token_cookie_is_403() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/auth/signup",
                json!({"email": "a@x.com", "username": "alice", "password": "secret1"}),
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/refresh")
                    .header(header::COOKIE, format!("refreshToken={}", access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn logout_clears_the_refresh_cookie() {
        let app = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("refreshToken="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
