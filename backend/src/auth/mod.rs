//! Authentication module for managing user accounts, sessions, and access control.
//!
//! This module provides the public interface for user authentication-related
//! functionalities such as signup, login, token management, authorization
//! middleware and the ownership guard for mutating routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod ownership;
pub mod password;
pub mod routes;
pub mod service;
