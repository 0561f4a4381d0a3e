//! Database models for Gestione Olio
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
