//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::auth::password::CredentialStore;
use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{TokenError, TokenIssuer, TokenType};
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for signup, login and token rotation.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    credentials: CredentialStore,
    tokens: TokenIssuer,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance. The pool and config are injected;
    /// nothing here reads ambient state.
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            pool,
            credentials: CredentialStore::new(config.bcrypt_cost),
            tokens: TokenIssuer::new(config),
        }
    }

    /// Register a new user and establish their first session.
    ///
    /// Username and email conflicts are reported separately so the client
    /// can tell which field to correct.
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthSession> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(flatten_errors(validation_errors)));
        }

        let users = UserRepository::new(self.pool);

        if users.username_exists(&request.username).await? {
            return Err(ServiceError::conflict("Username is taken"));
        }

        if users.email_exists(&request.email).await? {
            return Err(ServiceError::conflict(
                "An account with this email address already exists",
            ));
        }

        let password_hash = self.credentials.hash(&request.password).await?;

        let user = users
            .create_user(crate::database::models::CreateUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;

        self.establish_session(user.into())
    }

    /// Authenticate a user by email and password.
    ///
    /// An unknown email and a wrong password produce the same response so
    /// the endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthSession> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(flatten_errors(validation_errors)));
        }

        let users = UserRepository::new(self.pool);

        let Some(user) = users.get_user_by_email(&request.email).await? else {
            return Err(ServiceError::unauthorized("Invalid credentials"));
        };

        if !self
            .credentials
            .verify(&request.password, &user.password_hash)
            .await?
        {
            return Err(ServiceError::unauthorized("Invalid credentials"));
        }

        self.establish_session(user.into())
    }

    /// Redeem a refresh token for a brand-new access/refresh pair.
    ///
    /// There is no server-side revocation list; the previous refresh token
    /// stays cryptographically valid until its own expiry.
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthSession> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenType::Refresh)
            .map_err(|e| match e {
                TokenError::WrongType => ServiceError::forbidden("Invalid token type"),
                TokenError::Expired | TokenError::Malformed => {
                    ServiceError::forbidden("Invalid or expired refresh token")
                }
            })?;

        let users = UserRepository::new(self.pool);

        // The user may have been deleted since the token was issued.
        let Some(user) = users.get_user_by_id(claims.sub).await? else {
            return Err(ServiceError::unauthorized("User not found"));
        };

        self.establish_session(user.into())
    }

    fn establish_session(&self, user: UserInfo) -> ServiceResult<AuthSession> {
        let access_token = self.tokens.issue_access(user.id)?;
        let refresh_token = self.tokens.issue_refresh(user.id)?;

        Ok(AuthSession {
            user,
            access_token,
            refresh_token,
        })
    }
}

fn flatten_errors(validation_errors: validator::ValidationErrors) -> String {
    validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect::<Vec<String>>()
        .join(", ")
}
