//! Stock-keeping variants

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The addressable stock-keeping unit: a unique (vintage, lot, size) tuple
///
/// Variants are defined externally; this core only reads them.
/// `units_on_hand` is the current total across all warehouses, as exposed
/// by the stock views for the record-form cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub variant_id: Uuid,
    pub lot_id: Uuid,
    pub lot_code: String,
    pub vintage: i32,
    pub size_id: Uuid,
    pub size_label: String,
    /// Volume in milliliters, the canonical sort/grouping key for size
    pub ml: i32,
    pub units_on_hand: i64,
}
