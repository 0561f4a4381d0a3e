//! Movement recorder and query engine
//!
//! The ledger is append-only: movements are never mutated or deleted, and
//! corrections are recorded as new `adjust` movements. Recording is a
//! single INSERT; concurrent recorders never coordinate.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::history::{page_offset, PAGE_SIZE};
use shared::validation::{clamp_quantity, search_pattern};

use crate::error::{AppError, AppResult};
use crate::models::{
    CurrentIdentity, Movement, MovementFilters, MovementKind, MovementPage, MovementRow,
};

/// Movement ledger service
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

/// Input for recording a movement
///
/// `created_by` is never part of the payload; the acting user comes from
/// the authenticated session.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordMovementInput {
    pub variant_id: Uuid,
    pub warehouse_id: Uuid,
    pub movement: MovementKind,
    pub quantity_units: i32,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Row from `v_movements_detailed`
///
/// The stored movement kind arrives as text and is validated into the
/// closed enum at this boundary.
#[derive(Debug, FromRow)]
struct MovementLogRecord {
    id: Uuid,
    created_at: DateTime<Utc>,
    movement: String,
    quantity_units: i32,
    note: Option<String>,
    variant_id: Uuid,
    vintage: i32,
    lot_code: String,
    size_label: String,
    ml: i32,
    created_by: Option<Uuid>,
    operator_email: Option<String>,
    warehouse_id: Uuid,
    warehouse_name: String,
}

impl MovementLogRecord {
    fn into_row(self) -> AppResult<MovementRow> {
        let movement = MovementKind::from_str(&self.movement)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(MovementRow {
            id: self.id,
            created_at: self.created_at,
            movement,
            quantity_units: self.quantity_units,
            note: self.note,
            variant_id: self.variant_id,
            vintage: self.vintage,
            lot_code: self.lot_code,
            size_label: self.size_label,
            ml: self.ml,
            created_by: self.created_by,
            operator_email: self.operator_email,
            warehouse_id: self.warehouse_id,
            warehouse_name: self.warehouse_name,
        })
    }
}

impl MovementService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append one movement to the ledger.
    ///
    /// Exactly one row is created per successful call; repeating a call
    /// creates a new, distinct movement (each represents a real-world
    /// event, so no deduplication). A rejected write leaves the ledger
    /// unchanged and is never retried here.
    pub async fn record_movement(
        &self,
        actor: &CurrentIdentity,
        input: RecordMovementInput,
    ) -> AppResult<Movement> {
        if !actor.can_record_movements() {
            return Err(AppError::InsufficientPermissions);
        }

        // Final normalization before append; the form applies the same rule
        // on every edit.
        let quantity_units = clamp_quantity(input.movement, input.quantity_units);

        let variant_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM variants WHERE id = $1)",
        )
        .bind(input.variant_id)
        .fetch_one(&self.db)
        .await?;

        if !variant_exists {
            return Err(AppError::NotFound("Variant".to_string()));
        }

        let warehouse_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
        )
        .bind(input.warehouse_id)
        .fetch_one(&self.db)
        .await?;

        if !warehouse_exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        let note = input.note.filter(|n| !n.trim().is_empty());

        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            r#"
            INSERT INTO inventory_movements
                (variant_id, warehouse_id, movement, quantity_units, note, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at
            "#,
        )
        .bind(input.variant_id)
        .bind(input.warehouse_id)
        .bind(input.movement.as_str())
        .bind(quantity_units)
        .bind(&note)
        .bind(actor.user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(Movement {
            id,
            created_at,
            variant_id: input.variant_id,
            warehouse_id: input.warehouse_id,
            movement: input.movement,
            quantity_units,
            note,
            created_by: Some(actor.user_id),
        })
    }

    /// One page of movement history, most recent first.
    ///
    /// Filters combine with AND; the free-text term matches note or
    /// operator identity as a case-insensitive literal substring. `total`
    /// is the pre-pagination match count.
    pub async fn query_movements(
        &self,
        filters: &MovementFilters,
        page: u32,
    ) -> AppResult<MovementPage> {
        let kind = filters.kind.map(|k| k.as_str());
        let pattern = filters.search.as_deref().and_then(search_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM v_movements_detailed
            WHERE ($1::text IS NULL OR movement = $1)
              AND ($2::uuid IS NULL OR warehouse_id = $2)
              AND ($3::int IS NULL OR vintage = $3)
              AND ($4::text IS NULL OR lot_code = $4)
              AND ($5::text IS NULL OR size_label = $5)
              AND ($6::text IS NULL
                   OR note ILIKE $6 ESCAPE '\'
                   OR operator_email ILIKE $6 ESCAPE '\')
            "#,
        )
        .bind(kind)
        .bind(filters.warehouse_id)
        .bind(filters.vintage)
        .bind(filters.lot_code.as_deref())
        .bind(filters.size_label.as_deref())
        .bind(pattern.as_deref())
        .fetch_one(&self.db)
        .await?;

        let records = sqlx::query_as::<_, MovementLogRecord>(
            r#"
            SELECT id, created_at, movement, quantity_units, note, variant_id,
                   vintage, lot_code, size_label, ml, created_by,
                   operator_email, warehouse_id, warehouse_name
            FROM v_movements_detailed
            WHERE ($1::text IS NULL OR movement = $1)
              AND ($2::uuid IS NULL OR warehouse_id = $2)
              AND ($3::int IS NULL OR vintage = $3)
              AND ($4::text IS NULL OR lot_code = $4)
              AND ($5::text IS NULL OR size_label = $5)
              AND ($6::text IS NULL
                   OR note ILIKE $6 ESCAPE '\'
                   OR operator_email ILIKE $6 ESCAPE '\')
            ORDER BY created_at DESC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(kind)
        .bind(filters.warehouse_id)
        .bind(filters.vintage)
        .bind(filters.lot_code.as_deref())
        .bind(filters.size_label.as_deref())
        .bind(pattern.as_deref())
        .bind(i64::from(PAGE_SIZE))
        .bind(page_offset(page, PAGE_SIZE))
        .fetch_all(&self.db)
        .await?;

        let rows = records
            .into_iter()
            .map(MovementLogRecord::into_row)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(MovementPage { rows, total })
    }

    /// Serialize one loaded page of history as CSV.
    pub fn export_csv(rows: &[MovementRow]) -> AppResult<String> {
        shared::export::movements_to_csv(rows)
            .map_err(|e| AppError::Internal(format!("CSV export error: {}", e)))
    }
}
