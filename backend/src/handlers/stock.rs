//! HTTP handlers for stock projections

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{StockRow, Variant};
use crate::services::StockService;
use crate::AppState;

/// Query parameters for the stock endpoint
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    /// When set, stock is partitioned to this warehouse; otherwise summed
    /// across all warehouses
    pub warehouse_id: Option<Uuid>,
}

/// Current stock levels, unscoped or per-warehouse by filter selection
pub async fn get_stock(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> AppResult<Json<Vec<StockRow>>> {
    let service = StockService::new(state.db);
    let rows = match query.warehouse_id {
        Some(warehouse_id) => service.stock_by_warehouse(warehouse_id).await?,
        None => service.stock_summary().await?,
    };
    Ok(Json(rows))
}

/// Variants with activity, for the record-form cascade
pub async fn list_stock_variants(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Variant>>> {
    let service = StockService::new(state.db);
    let variants = service.list_variants().await?;
    Ok(Json(variants))
}
