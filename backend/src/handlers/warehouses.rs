//! HTTP handlers for warehouse reference data

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::Warehouse;
use crate::services::WarehouseService;
use crate::AppState;

/// List warehouses ordered by name
pub async fn list_warehouses(State(state): State<AppState>) -> AppResult<Json<Vec<Warehouse>>> {
    let service = WarehouseService::new(state.db);
    let warehouses = service.list().await?;
    Ok(Json(warehouses))
}
