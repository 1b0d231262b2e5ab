//! Cleanup business logic service.
//!
//! Reads are public; every mutation runs the fixed sequence: confirm the
//! record exists, confirm the authenticated identity owns it, then mutate.
//! The sequence is not wrapped in a transaction; a concurrent delete between
//! the check and the mutation is an accepted gap.

use crate::auth::models::AuthUser;
use crate::auth::ownership::authorize_owner;
use crate::database::models::{Cleanup, CreateCleanup};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::cleanup_repository::CleanupRepository;
use sqlx::SqlitePool;
use validator::Validate;

pub struct CleanupService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> CleanupService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists cleanups, newest first, optionally limited.
    pub async fn get_cleanups(&self, limit: Option<i64>) -> ServiceResult<Vec<Cleanup>> {
        let repo = CleanupRepository::new(self.pool);
        Ok(repo.get_cleanups(limit).await?)
    }

    /// Retrieves a cleanup by ID with existence verification.
    pub async fn get_cleanup_required(&self, id: i64) -> ServiceResult<Cleanup> {
        let repo = CleanupRepository::new(self.pool);
        let cleanup = repo
            .get_cleanup_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cleanup", id.to_string()))?;
        Ok(cleanup)
    }

    /// Creates a cleanup owned by the authenticated identity.
    pub async fn create_cleanup(
        &self,
        create_cleanup: CreateCleanup,
        identity: &AuthUser,
    ) -> ServiceResult<Cleanup> {
        validate_payload(&create_cleanup)?;

        let repo = CleanupRepository::new(self.pool);
        let cleanup = repo.create_cleanup(create_cleanup, identity.id).await?;
        Ok(cleanup)
    }

    /// Replaces a cleanup's fields. Existence, then ownership, then mutation.
    pub async fn update_cleanup(
        &self,
        id: i64,
        update: CreateCleanup,
        identity: &AuthUser,
    ) -> ServiceResult<Cleanup> {
        validate_payload(&update)?;

        let cleanup = self.get_cleanup_required(id).await?;
        authorize_owner(
            &cleanup,
            identity.id,
            "Not authorized to update this cleanup.",
        )?;

        let repo = CleanupRepository::new(self.pool);
        let updated = repo
            .update_cleanup(id, update)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cleanup", id.to_string()))?;
        Ok(updated)
    }

    /// Deletes a cleanup. Existence, then ownership, then mutation.
    pub async fn delete_cleanup(&self, id: i64, identity: &AuthUser) -> ServiceResult<()> {
        let cleanup = self.get_cleanup_required(id).await?;
        authorize_owner(
            &cleanup,
            identity.id,
            "Not authorized to delete this cleanup.",
        )?;

        let repo = CleanupRepository::new(self.pool);
        repo.delete_cleanup(id).await?;
        Ok(())
    }
}

fn validate_payload(payload: &CreateCleanup) -> ServiceResult<()> {
    if let Err(validation_errors) = payload.validate() {
        let error_messages: Vec<String> = validation_errors
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
            .collect();
        return Err(ServiceError::validation(error_messages.join(", ")));
    }
    Ok(())
}
