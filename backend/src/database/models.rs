//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for inserting a new user. The password has already been hashed by the
/// time this struct exists.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A beach/park cleanup record. `user_id` is fixed at creation and treated as
/// the authoritative owner for all mutations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cleanup {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub group_size: i64,
    pub env_type: String,
    pub total_items: i64,
    pub total_bags: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}

/// Request body for creating or replacing a cleanup record. The owner and
/// creation timestamp are set server-side, never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCleanup {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Location must be between 1-255 characters"))]
    pub location: String,

    #[validate(range(min = 1, message = "Group size must be at least 1"))]
    pub group_size: i64,

    #[validate(length(min = 1, message = "Environment type is required"))]
    pub env_type: String,

    #[validate(range(min = 0, message = "Total items cannot be negative"))]
    pub total_items: i64,

    #[validate(range(min = 0, message = "Total bags cannot be negative"))]
    pub total_bags: i64,
}

/// A diet action meal record. Shares the cleanup column set; ownership rules
/// are identical.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DietMeal {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub group_size: i64,
    pub env_type: String,
    pub total_items: i64,
    pub total_bags: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}

/// Request body for creating or replacing a diet meal record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDietMeal {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Location must be between 1-255 characters"))]
    pub location: String,

    #[validate(range(min = 1, message = "Group size must be at least 1"))]
    pub group_size: i64,

    #[validate(length(min = 1, message = "Environment type is required"))]
    pub env_type: String,

    #[validate(range(min = 0, message = "Total items cannot be negative"))]
    pub total_items: i64,

    #[validate(range(min = 0, message = "Total bags cannot be negative"))]
    pub total_bags: i64,
}
