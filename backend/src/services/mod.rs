//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations and orchestrate interactions between different parts of the
//! application, such as enforcing ownership before a record is mutated.

pub mod cleanup_service;
pub mod meal_service;
pub mod user_service;
