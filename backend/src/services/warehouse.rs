//! Warehouse reference-data service

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Warehouse;

/// Warehouse service
///
/// Warehouses are created and renamed by an external admin process; this
/// service only reads them.
#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct WarehouseRow {
    id: Uuid,
    name: String,
}

impl WarehouseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all warehouses ordered by name.
    ///
    /// When the table read yields nothing (row-level security may hide it
    /// from some deployments), the list is derived from the per-warehouse
    /// stock view instead.
    pub async fn list(&self) -> AppResult<Vec<Warehouse>> {
        let rows = sqlx::query_as::<_, WarehouseRow>(
            "SELECT id, name FROM warehouses ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        let rows = if rows.is_empty() {
            sqlx::query_as::<_, WarehouseRow>(
                r#"
                SELECT DISTINCT warehouse_id AS id, warehouse_name AS name
                FROM v_stock_detailed_wh
                ORDER BY name
                "#,
            )
            .fetch_all(&self.db)
            .await?
        } else {
            rows
        };

        Ok(rows
            .into_iter()
            .map(|r| Warehouse {
                id: r.id,
                name: r.name,
            })
            .collect())
    }
}
