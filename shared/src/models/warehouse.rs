//! Warehouse reference data

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical warehouse
///
/// Created and renamed by an external admin process; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
}
