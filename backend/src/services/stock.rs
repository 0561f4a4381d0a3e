//! Stock read service
//!
//! Serves on-hand quantities from the materialized stock views. The views
//! are recomputed by the store on every ledger append; this service never
//! writes. The fold semantics the views implement are the ones in
//! `shared::projection`.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{StockRow, Variant};

/// Stock projection read service
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Row from `v_stock_detailed_sum` (summed across warehouses)
#[derive(Debug, FromRow)]
struct StockSumRow {
    variant_id: Uuid,
    lot_code: String,
    vintage: i32,
    size_label: String,
    ml: i32,
    units_on_hand: i64,
    liters_on_hand: Decimal,
}

/// Row from `v_stock_detailed_wh` (partitioned by warehouse)
#[derive(Debug, FromRow)]
struct StockWhRow {
    variant_id: Uuid,
    lot_code: String,
    vintage: i32,
    size_label: String,
    ml: i32,
    units_on_hand: i64,
    liters_on_hand: Decimal,
    warehouse_id: Uuid,
    warehouse_name: String,
}

/// Row from `v_stock_units` (variant display attributes for the form cascade)
#[derive(Debug, FromRow)]
struct VariantUnitsRow {
    variant_id: Uuid,
    lot_id: Uuid,
    lot_code: String,
    vintage: i32,
    size_id: Uuid,
    size_label: String,
    ml: i32,
    units_on_hand: i64,
}

impl StockService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Current stock per variant, summed across all warehouses.
    ///
    /// Ordering is the display contract: vintage descending, lot ascending,
    /// size (ml) ascending.
    pub async fn stock_summary(&self) -> AppResult<Vec<StockRow>> {
        let rows = sqlx::query_as::<_, StockSumRow>(
            r#"
            SELECT variant_id, lot_code, vintage, size_label, ml,
                   units_on_hand, liters_on_hand
            FROM v_stock_detailed_sum
            ORDER BY vintage DESC, lot_code ASC, ml ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StockRow {
                variant_id: r.variant_id,
                lot_code: r.lot_code,
                vintage: r.vintage,
                size_label: r.size_label,
                ml: r.ml,
                units_on_hand: r.units_on_hand,
                liters_on_hand: r.liters_on_hand,
                warehouse_id: None,
                warehouse_name: None,
            })
            .collect())
    }

    /// Current stock per variant within a single warehouse.
    pub async fn stock_by_warehouse(&self, warehouse_id: Uuid) -> AppResult<Vec<StockRow>> {
        let rows = sqlx::query_as::<_, StockWhRow>(
            r#"
            SELECT variant_id, lot_code, vintage, size_label, ml,
                   units_on_hand, liters_on_hand, warehouse_id, warehouse_name
            FROM v_stock_detailed_wh
            WHERE warehouse_id = $1
            ORDER BY vintage DESC, lot_code ASC, ml ASC
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StockRow {
                variant_id: r.variant_id,
                lot_code: r.lot_code,
                vintage: r.vintage,
                size_label: r.size_label,
                ml: r.ml,
                units_on_hand: r.units_on_hand,
                liters_on_hand: r.liters_on_hand,
                warehouse_id: Some(r.warehouse_id),
                warehouse_name: Some(r.warehouse_name),
            })
            .collect())
    }

    /// Variants with activity, for the vintage -> lot -> size form cascade.
    pub async fn list_variants(&self) -> AppResult<Vec<Variant>> {
        let rows = sqlx::query_as::<_, VariantUnitsRow>(
            r#"
            SELECT variant_id, lot_id, lot_code, vintage, size_id,
                   size_label, ml, units_on_hand
            FROM v_stock_units
            ORDER BY vintage DESC, lot_code ASC, ml ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Variant {
                variant_id: r.variant_id,
                lot_id: r.lot_id,
                lot_code: r.lot_code,
                vintage: r.vintage,
                size_id: r.size_id,
                size_label: r.size_label,
                ml: r.ml,
                units_on_hand: r.units_on_hand,
            })
            .collect())
    }
}
