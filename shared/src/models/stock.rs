//! Projected stock levels

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// On-hand stock for one variant, optionally scoped to one warehouse
///
/// `warehouse_id`/`warehouse_name` are set only in per-warehouse mode.
/// A variant with no movements has no row; absence means "no activity",
/// not "known-zero stock".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRow {
    pub variant_id: Uuid,
    pub lot_code: String,
    pub vintage: i32,
    pub size_label: String,
    pub ml: i32,
    pub units_on_hand: i64,
    pub liters_on_hand: Decimal,
    pub warehouse_id: Option<Uuid>,
    pub warehouse_name: Option<String>,
}

impl StockRow {
    /// Derive liters from units for a given bottle volume.
    pub fn liters(units_on_hand: i64, ml: i32) -> Decimal {
        Decimal::from(units_on_hand) * Decimal::from(ml) / Decimal::from(1000)
    }
}
