//! Database repository for cleanup records.
//!
//! Plain parameterized reads and writes for the cleanups table. Ownership
//! decisions happen in the service layer; the repository only reports what
//! is stored.

use crate::database::models::{Cleanup, CreateCleanup};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct CleanupRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> CleanupRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists cleanups, newest first, optionally limited.
    pub async fn get_cleanups(&self, limit: Option<i64>) -> Result<Vec<Cleanup>> {
        let cleanups = match limit {
            Some(limit) => {
                sqlx::query_as::<_, Cleanup>(
                    "SELECT * FROM cleanups ORDER BY created_at DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Cleanup>("SELECT * FROM cleanups ORDER BY created_at DESC")
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(cleanups)
    }

    /// Retrieves a cleanup by its unique identifier.
    pub async fn get_cleanup_by_id(&self, id: i64) -> Result<Option<Cleanup>> {
        let cleanup = sqlx::query_as::<_, Cleanup>("SELECT * FROM cleanups WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(cleanup)
    }

    /// Inserts a new cleanup owned by `user_id`.
    pub async fn create_cleanup(&self, cleanup: CreateCleanup, user_id: i64) -> Result<Cleanup> {
        let cleanup = sqlx::query_as::<_, Cleanup>(
            r#"
            INSERT INTO cleanups
                (title, description, date, location, group_size, env_type,
                 total_items, total_bags, created_at, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&cleanup.title)
        .bind(&cleanup.description)
        .bind(cleanup.date)
        .bind(&cleanup.location)
        .bind(cleanup.group_size)
        .bind(&cleanup.env_type)
        .bind(cleanup.total_items)
        .bind(cleanup.total_bags)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(cleanup)
    }

    /// Replaces the mutable fields of a cleanup. The owner never changes.
    pub async fn update_cleanup(&self, id: i64, cleanup: CreateCleanup) -> Result<Option<Cleanup>> {
        let cleanup = sqlx::query_as::<_, Cleanup>(
            r#"
            UPDATE cleanups
            SET title = ?, description = ?, date = ?, location = ?,
                group_size = ?, env_type = ?, total_items = ?, total_bags = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&cleanup.title)
        .bind(&cleanup.description)
        .bind(cleanup.date)
        .bind(&cleanup.location)
        .bind(cleanup.group_size)
        .bind(&cleanup.env_type)
        .bind(cleanup.total_items)
        .bind(cleanup.total_bags)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cleanup)
    }

    /// Deletes a cleanup.
    pub async fn delete_cleanup(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM cleanups WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
