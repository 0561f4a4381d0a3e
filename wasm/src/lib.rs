//! WebAssembly module for Gestione Olio
//!
//! Provides client-side computation for:
//! - Quantity normalization on every keystroke of the movement form
//! - Search-term escaping for the history filter
//! - Pagination math
//! - Offline stock projection previews
//! - Client-side CSV export of the loaded history page

use wasm_bindgen::prelude::*;

use shared::history::{total_pages, PAGE_SIZE};
use shared::models::{MovementKind, MovementRow};
use shared::projection::{project, GroupBy};
use shared::validation::{escape_like, normalize_quantity};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_kind(kind: &str) -> Result<MovementKind, JsValue> {
    MovementKind::from_str(kind).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalize free-text quantity input for a movement kind
///
/// Runs on every keystroke and once more before submission.
#[wasm_bindgen]
pub fn normalize_quantity_input(raw: &str, kind: &str) -> Result<i32, JsValue> {
    Ok(normalize_quantity(raw, parse_kind(kind)?))
}

/// Escape `%`, `_` and `\` so a search term matches literally
#[wasm_bindgen]
pub fn escape_search_term(term: &str) -> String {
    escape_like(term)
}

/// Total pages for a match count at the fixed history page size
#[wasm_bindgen]
pub fn history_total_pages(total: i64) -> u32 {
    total_pages(total, PAGE_SIZE)
}

/// Project movement rows (JSON array) into stock rows (JSON array)
///
/// `by_warehouse` selects per-warehouse partitioning instead of the
/// cross-warehouse sum.
#[wasm_bindgen]
pub fn project_stock(movements_json: &str, by_warehouse: bool) -> Result<String, JsValue> {
    let movements: Vec<MovementRow> = serde_json::from_str(movements_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid movements JSON: {}", e)))?;

    let group = if by_warehouse {
        GroupBy::VariantWarehouse
    } else {
        GroupBy::Variant
    };
    let rows = project(&movements, group);

    serde_json::to_string(&rows)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Serialize the loaded history page (JSON array) as CSV
#[wasm_bindgen]
pub fn export_movements_csv(movements_json: &str) -> Result<String, JsValue> {
    let movements: Vec<MovementRow> = serde_json::from_str(movements_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid movements JSON: {}", e)))?;

    shared::export::movements_to_csv(&movements)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
