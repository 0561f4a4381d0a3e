//! Business logic services for Gestione Olio

pub mod auth;
pub mod movement;
pub mod stock;
pub mod warehouse;

pub use auth::AuthService;
pub use movement::MovementService;
pub use stock::StockService;
pub use warehouse::WarehouseService;
