//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the tracked-resource
//! domains (cleanups, diet meals) and user profiles, excluding core
//! authentication routes which are handled separately.

pub mod cleanup;
pub mod common;
pub mod meal;
pub mod user;
