//! CSV export of movement history
//!
//! Export operates over the rows currently loaded in the history display
//! (one page), not the full filtered result set.

use thiserror::Error;

use crate::models::MovementRow;

/// CSV column headers, in the fixed export order
const CSV_HEADER: [&str; 10] = [
    "Data",
    "Tipo",
    "Magazzino",
    "Annata",
    "Lotto",
    "Formato",
    "Qtà",
    "Nota",
    "Operatore",
    "Variante",
];

/// Display rendering of the movement timestamp (Italian convention).
///
/// This is a display choice, not a wire format; exports produced under a
/// different locale setting may legitimately differ textually.
const CSV_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV writer error: {0}")]
    Writer(String),
}

/// Serialize one page of movement rows as CSV.
///
/// Every field is quoted; embedded quote characters are doubled.
pub fn movements_to_csv(rows: &[MovementRow]) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    for r in rows {
        wtr.write_record([
            r.created_at.format(CSV_DATE_FORMAT).to_string(),
            r.movement.as_str().to_string(),
            r.warehouse_name.clone(),
            r.vintage.to_string(),
            r.lot_code.clone(),
            r.size_label.clone(),
            r.quantity_units.to_string(),
            r.note.clone().unwrap_or_default(),
            r.operator_email.clone().unwrap_or_default(),
            r.variant_id.to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Writer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Writer(e.to_string()))
}
