//! HTTP handlers for Gestione Olio

pub mod auth;
pub mod health;
pub mod movements;
pub mod stock;
pub mod warehouses;

pub use auth::*;
pub use health::*;
pub use movements::*;
pub use stock::*;
pub use warehouses::*;
