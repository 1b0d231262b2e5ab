//! Diet meal business logic service.
//!
//! Same shape as the cleanup service: public reads, owner-gated mutations
//! with the existence check always ahead of the ownership comparison.

use crate::auth::models::AuthUser;
use crate::auth::ownership::authorize_owner;
use crate::database::models::{CreateDietMeal, DietMeal};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::meal_repository::MealRepository;
use sqlx::SqlitePool;
use validator::Validate;

pub struct MealService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> MealService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists meals, newest first.
    pub async fn get_meals(&self) -> ServiceResult<Vec<DietMeal>> {
        let repo = MealRepository::new(self.pool);
        Ok(repo.get_meals().await?)
    }

    /// Lists all meals recorded by one user.
    pub async fn get_meals_by_user(&self, user_id: i64) -> ServiceResult<Vec<DietMeal>> {
        let repo = MealRepository::new(self.pool);
        Ok(repo.get_meals_by_user_id(user_id).await?)
    }

    /// Retrieves a meal by ID with existence verification.
    pub async fn get_meal_required(&self, id: i64) -> ServiceResult<DietMeal> {
        let repo = MealRepository::new(self.pool);
        let meal = repo
            .get_meal_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Diet meal", id.to_string()))?;
        Ok(meal)
    }

    /// Creates a meal owned by the authenticated identity.
    pub async fn create_meal(
        &self,
        create_meal: CreateDietMeal,
        identity: &AuthUser,
    ) -> ServiceResult<DietMeal> {
        validate_payload(&create_meal)?;

        let repo = MealRepository::new(self.pool);
        let meal = repo.create_meal(create_meal, identity.id).await?;
        Ok(meal)
    }

    /// Replaces a meal's fields. Existence, then ownership, then mutation.
    pub async fn update_meal(
        &self,
        id: i64,
        update: CreateDietMeal,
        identity: &AuthUser,
    ) -> ServiceResult<DietMeal> {
        validate_payload(&update)?;

        let meal = self.get_meal_required(id).await?;
        authorize_owner(&meal, identity.id, "Not authorized to update this action.")?;

        let repo = MealRepository::new(self.pool);
        let updated = repo
            .update_meal(id, update)
            .await?
            .ok_or_else(|| ServiceError::not_found("Diet meal", id.to_string()))?;
        Ok(updated)
    }

    /// Deletes a meal. Existence, then ownership, then mutation.
    pub async fn delete_meal(&self, id: i64, identity: &AuthUser) -> ServiceResult<()> {
        let meal = self.get_meal_required(id).await?;
        authorize_owner(&meal, identity.id, "Not authorized to delete this action.")?;

        let repo = MealRepository::new(self.pool);
        repo.delete_meal(id).await?;
        Ok(())
    }
}

fn validate_payload(payload: &CreateDietMeal) -> ServiceResult<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateUser;
    use crate::database::test_pool;
    use crate::repositories::user_repository::UserRepository;
    use chrono::Utc;

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

    fn payload(title: &str) -> CreateDietMeal {
        CreateDietMeal {
            title: title.to_string(),
            description: "Plant-based lunch".to_string(),
            date: Utc::now(),
            location: "Home".to_string(),
            group_size: 1,
            env_type: "indoor".to_string(),
            total_items: 1,
            total_bags: 0,
        }
    }

    #[tokio::test]
    async fn meals_are_owned_by_their_creator() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;
        let bob = insert_user(&pool, "bob", "b@x.com").await;

        let service = MealService::new(&pool);
        let meal = service.create_meal(payload("Lunch"), &alice).await.unwrap();
        assert_eq!(meal.user_id, alice.id);

        let err = service.delete_meal(meal.id, &bob).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden { .. }));

        service.delete_meal(meal.id, &alice).await.unwrap();
    }

    #[tokio::test]
    async fn missing_meal_is_a_404_before_any_ownership_check() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;

        let service = MealService::new(&pool);
        let err = service.delete_meal(42, &alice).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn per_user_listing_filters_by_owner() {
        let pool = test_pool().await;
        let alice = insert_user(&pool, "alice", "a@x.com").await;
        let bob = insert_user(&pool, "bob", "b@x.com").await;

        let service = MealService::new(&pool);
        service.create_meal(payload("Lunch"), &alice).await.unwrap();
        service.create_meal(payload("Dinner"), &alice).await.unwrap();
        service.create_meal(payload("Snack"), &bob).await.unwrap();

        let alices = service.get_meals_by_user(alice.id).await.unwrap();
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|meal| meal.user_id == alice.id));
    }
}
