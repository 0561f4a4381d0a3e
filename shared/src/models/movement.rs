//! Inventory movement ledger entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Movement kinds
///
/// `In` and `Out` carry direction in the tag and store a positive quantity;
/// `Adjust` stores a signed, nonzero quantity (positive = found extra stock,
/// negative = shrinkage or write-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
    Adjust,
}

/// Error returned when a stored movement kind string is not recognized
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown movement kind: {0}")]
pub struct UnknownMovementKind(pub String);

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "in",
            MovementKind::Out => "out",
            MovementKind::Adjust => "adjust",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, UnknownMovementKind> {
        match s {
            "in" => Ok(MovementKind::In),
            "out" => Ok(MovementKind::Out),
            "adjust" => Ok(MovementKind::Adjust),
            other => Err(UnknownMovementKind(other.to_string())),
        }
    }

    /// Effect of a movement on on-hand units.
    ///
    /// `out` quantities are stored positive; the sign lives in the tag.
    pub fn signed_units(&self, quantity_units: i32) -> i64 {
        match self {
            MovementKind::In | MovementKind::Adjust => i64::from(quantity_units),
            MovementKind::Out => -i64::from(quantity_units),
        }
    }
}

/// An immutable ledger entry
///
/// Once appended, movements are never mutated or deleted; corrections are
/// new `adjust` movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub variant_id: Uuid,
    pub warehouse_id: Uuid,
    pub movement: MovementKind,
    pub quantity_units: i32,
    pub note: Option<String>,
    pub created_by: Option<Uuid>,
}

/// A movement joined with its display attributes for history/audit views
///
/// Carries the acting user's display identity (`operator_email`), never the
/// raw internal user id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub movement: MovementKind,
    pub quantity_units: i32,
    pub note: Option<String>,
    pub variant_id: Uuid,
    pub vintage: i32,
    pub lot_code: String,
    pub size_label: String,
    pub ml: i32,
    pub created_by: Option<Uuid>,
    pub operator_email: Option<String>,
    pub warehouse_id: Uuid,
    pub warehouse_name: String,
}

/// Filters over the movement ledger, combined with logical AND
///
/// All fields optional; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementFilters {
    pub kind: Option<MovementKind>,
    pub warehouse_id: Option<Uuid>,
    pub vintage: Option<i32>,
    pub lot_code: Option<String>,
    pub size_label: Option<String>,
    /// Free text matched against note or operator identity,
    /// case-insensitive, wildcards treated literally
    pub search: Option<String>,
}

/// One page of movement history plus the pre-pagination match count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementPage {
    pub rows: Vec<MovementRow>,
    pub total: i64,
}
