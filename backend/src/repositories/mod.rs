//! Module for database repositories.
//!
//! Each repository wraps the plain parameterized queries for one entity and
//! exposes them as typed asynchronous operations on the shared pool.

pub mod cleanup_repository;
pub mod meal_repository;
pub mod user_repository;
