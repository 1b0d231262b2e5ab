//! User business logic service.
//!
//! Profile reads plus the two mutations this system allows on a user:
//! username updates and account deletion, both restricted to the owning
//! identity. Email is fixed at signup and never mutated here.

use crate::auth::models::{AuthUser, UpdateUsernameRequest};
use crate::auth::ownership::authorize_owner;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use sqlx::SqlitePool;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user_required(&self, id: i64) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;
        Ok(user)
    }

    /// Changes a user's username. Only the owning identity may do this, and
    /// the new name must be unique among all other users.
    pub async fn update_username(
        &self,
        id: i64,
        identity: &AuthUser,
        request: UpdateUsernameRequest,
    ) -> ServiceResult<User> {
        if let Err(validation_errors) = request.validate() {
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

        let repo = UserRepository::new(self.pool);

        // Existence before ownership before mutation.
        let user = self.get_user_required(id).await?;
        authorize_owner(&user, identity.id, "Not authorized to update this user.")?;

        if repo.username_exists_excluding(&request.username, id).await? {
            return Err(ServiceError::conflict("Username is taken"));
        }

        let updated = repo
            .update_username(id, &request.username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;

        Ok(updated)
    }

    /// Deletes a user account. Only the owning identity may do this.
    pub async fn delete_user(&self, id: i64, identity: &AuthUser) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);

        let user = self.get_user_required(id).await?;
        authorize_owner(&user, identity.id, "Not authorized to delete this user.")?;

        repo.delete_user(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateUser;
    use crate::database::test_pool;

    async fn insert_user(pool: &SqlitePool, username: &str, email: &str) -> AuthUser {
        let user = UserRepository::new(pool)
            .create_user(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: "irrelevant".to_string(),
            })
            .await
            .unwrap();
        AuthUser {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }

    fn rename_to(username: &str) -> UpdateUsernameRequest {
        UpdateUsernameRequest {
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn owner_can_rename_themselves() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;

        let service = UserService::new(&pool);
        let updated = service
            .update_username(alice.id, &alice, rename_to("alice2"))
            .await
            .unwrap();
        assert_eq!(updated.username, "alice2");
    }

    #[tokio::test]
    async fn renaming_another_user_is_forbidden() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;
        let bob = insert_user(&pool, "bob", "b@x.com").await;

        let service = UserService::new(&pool);
        let err = service
            .update_username(alice.id, &bob, rename_to("hijacked"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn renaming_to_a_taken_username_conflicts() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;
        insert_user(&pool, "bob", "b@x.com").await;

        let service = UserService::new(&pool);
        let err = service
            .update_username(alice.id, &alice, rename_to("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));

        // Keeping your own name is not a conflict.
        service
            .update_username(alice.id, &alice, rename_to("alice"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn only_the_owner_can_delete_the_account() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;
        let bob = insert_user(&pool, "bob", "b@x.com").await;

        let service = UserService::new(&pool);
        let err = service.delete_user(alice.id, &bob).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden { .. }));

        service.delete_user(alice.id, &alice).await.unwrap();
        let err = service.get_user_required(alice.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
