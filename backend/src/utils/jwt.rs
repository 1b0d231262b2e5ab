//! JWT token utilities for authentication and authorization.
//!
//! Provides creation and validation of the access/refresh token pair. Access
//! and refresh tokens are signed with separate secrets so that compromising
//! one does not forge the other; the refresh secret falls back to the access
//! secret when no dedicated one is configured.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// Refresh tokens always live this long; access token lifetime is
/// configuration-driven.
const REFRESH_TTL_DAYS: i64 = 7;

/// Discriminates the two token kinds carried in the `type` claim.
/// Cross-use (a refresh token on a protected route, an access token at the
/// refresh endpoint) is always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims for both token kinds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Owning user's id.
    pub sub: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued-at timestamp (unix seconds).
    pub iat: i64,
    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

/// Why a token failed verification. Callers branch on the kind: middleware
/// reports it in the 401 reason, the refresh endpoint turns it into a 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Malformed,
    #[error("wrong token type")]
    WrongType,
}

/// Issues and verifies the access/refresh token pair.
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(config: &Config) -> Self {
        let validation = Validation::new(Algorithm::HS256);

        TokenIssuer {
            access_encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            access_ttl: Duration::seconds(config.access_token_ttl_seconds as i64),
            validation,
        }
    }

    /// Signs a short-lived access token for the given user.
    pub fn issue_access(&self, user_id: i64) -> ServiceResult<String> {
        self.sign(user_id, TokenType::Access, self.access_ttl, &self.access_encoding)
    }

    /// Signs a 7-day refresh token for the given user.
    pub fn issue_refresh(&self, user_id: i64) -> ServiceResult<String> {
        self.sign(
            user_id,
            TokenType::Refresh,
            Duration::days(REFRESH_TTL_DAYS),
            &self.refresh_encoding,
        )
    }

    /// Checks signature, expiry and the `type` claim. The error kind tells
    /// the caller which check failed.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let decoding_key = match expected {
            TokenType::Access => &self.access_decoding,
            TokenType::Refresh => &self.refresh_decoding,
        };

        let data =
            decode::<Claims>(token, decoding_key, &self.validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if data.claims.token_type != expected {
            return Err(TokenError::WrongType);
        }

        Ok(data.claims)
    }

    fn sign(
        &self,
        user_id: i64,
        token_type: TokenType,
        ttl: Duration,
        key: &EncodingKey,
    ) -> ServiceResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }
}
