//! Shared types and domain logic for Gestione Olio
//!
//! This crate contains the backend-agnostic core shared between the HTTP
//! backend and the browser (via WASM): the data model, quantity
//! normalization, the stock projection fold, and the movement-history
//! view-state contracts.

pub mod export;
pub mod history;
pub mod models;
pub mod projection;
pub mod types;
pub mod validation;

pub use export::*;
pub use history::*;
pub use models::*;
pub use projection::*;
pub use types::*;
pub use validation::*;
