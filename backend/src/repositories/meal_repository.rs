//! Database repository for diet action meal records.
//!
//! Mirrors the cleanup repository over the diet_meals table, with an extra
//! per-user listing used by the public profile view.

use crate::database::models::{CreateDietMeal, DietMeal};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct MealRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> MealRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists meals, newest first.
    pub async fn get_meals(&self) -> Result<Vec<DietMeal>> {
        let meals = sqlx::query_as::<_, DietMeal>("SELECT * FROM diet_meals ORDER BY date DESC")
            .fetch_all(self.pool)
            .await?;

        Ok(meals)
    }

    /// Retrieves a meal by its unique identifier.
    pub async fn get_meal_by_id(&self, id: i64) -> Result<Option<DietMeal>> {
        let meal = sqlx::query_as::<_, DietMeal>("SELECT * FROM diet_meals WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(meal)
    }

    /// Lists all meals recorded by one user.
    pub async fn get_meals_by_user_id(&self, user_id: i64) -> Result<Vec<DietMeal>> {
        let meals = sqlx::query_as::<_, DietMeal>("SELECT * FROM diet_meals WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(meals)
    }

    /// Inserts a new meal owned by `user_id`.
    pub async fn create_meal(&self, meal: CreateDietMeal, user_id: i64) -> Result<DietMeal> {
        let meal = sqlx::query_as::<_, DietMeal>(
            r#"
            INSERT INTO diet_meals
                (title, description, date, location, group_size, env_type,
                 total_items, total_bags, created_at, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&meal.title)
        .bind(&meal.description)
        .bind(meal.date)
        .bind(&meal.location)
        .bind(meal.group_size)
        .bind(&meal.env_type)
        .bind(meal.total_items)
        .bind(meal.total_bags)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(meal)
    }

    /// Replaces the mutable fields of a meal. The owner never changes.
    pub async fn update_meal(&self, id: i64, meal: CreateDietMeal) -> Result<Option<DietMeal>> {
        let meal = sqlx::query_as::<_, DietMeal>(
            r#"
            UPDATE diet_meals
            SET title = ?, description = ?, date = ?, location = ?,
                group_size = ?, env_type = ?, total_items = ?, total_bags = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&meal.title)
        .bind(&meal.description)
        .bind(meal.date)
        .bind(&meal.location)
        .bind(meal.group_size)
        .bind(&meal.env_type)
        .bind(meal.total_items)
        .bind(meal.total_bags)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(meal)
    }

    /// Deletes a meal.
    pub async fn delete_meal(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM diet_meals WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
