//! HTTP handlers for the movement ledger

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{Movement, MovementFilters, MovementKind, MovementPage};
use crate::services::movement::RecordMovementInput;
use crate::services::MovementService;
use crate::AppState;

/// Query parameters for the movement history
///
/// All filters optional and combined with AND; `page` is 1-indexed.
#[derive(Debug, Deserialize)]
pub struct MovementHistoryQuery {
    pub movement: Option<MovementKind>,
    pub warehouse_id: Option<Uuid>,
    pub vintage: Option<i32>,
    pub lot_code: Option<String>,
    pub size_label: Option<String>,
    /// Free-text search over note or operator
    pub q: Option<String>,
    pub page: Option<u32>,
}

impl MovementHistoryQuery {
    fn filters(&self) -> MovementFilters {
        MovementFilters {
            kind: self.movement,
            warehouse_id: self.warehouse_id,
            vintage: self.vintage,
            lot_code: self.lot_code.clone(),
            size_label: self.size_label.clone(),
            search: self.q.clone(),
        }
    }
}

/// One page of movement history plus the total match count
pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<MovementHistoryQuery>,
) -> AppResult<Json<MovementPage>> {
    let service = MovementService::new(state.db);
    let page = service
        .query_movements(&query.filters(), query.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

/// Record one movement; requires the operator or admin role
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    input.validate().map_err(|e| AppError::Validation {
        field: "note".to_string(),
        message: e.to_string(),
        message_it: "La nota è troppo lunga".to_string(),
    })?;

    let service = MovementService::new(state.db);
    let movement = service
        .record_movement(&current_user.0.identity(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Export the requested history page as CSV
///
/// Export covers the one page addressed by the same filters the history
/// display uses, not the full filtered result set.
pub async fn export_movements_csv(
    State(state): State<AppState>,
    Query(query): Query<MovementHistoryQuery>,
) -> AppResult<impl IntoResponse> {
    let service = MovementService::new(state.db);
    let page = service
        .query_movements(&query.filters(), query.page.unwrap_or(1))
        .await?;
    let csv = MovementService::export_csv(&page.rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"movimenti.csv\"",
            ),
        ],
        csv,
    ))
}
