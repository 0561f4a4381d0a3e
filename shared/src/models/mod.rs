//! Domain models for Gestione Olio

mod movement;
mod stock;
mod user;
mod variant;
mod warehouse;

pub use movement::*;
pub use stock::*;
pub use user::*;
pub use variant::*;
pub use warehouse::*;
