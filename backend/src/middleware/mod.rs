//! Middleware for Gestione Olio

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
