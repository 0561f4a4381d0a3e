//! Stock projection: folding the movement ledger into on-hand quantities
//!
//! The production read path serves the same numbers from database views;
//! this fold is the reference semantics, also used in the browser for
//! offline previews. The fold is commutative and associative over the set
//! of movements, so totals do not depend on append or supply order.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{MovementRow, StockRow};

/// Projection grouping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One row per variant, summed across all warehouses
    Variant,
    /// One row per (variant, warehouse) pair
    VariantWarehouse,
}

/// Reduce a movement collection into on-hand stock rows.
///
/// A variant with zero movements yields no row. An empty ledger yields an
/// empty projection, never an error. Output ordering is the display
/// contract: vintage descending, lot_code ascending, ml ascending (and
/// warehouse name ascending within a variant in per-warehouse mode).
pub fn project(movements: &[MovementRow], group: GroupBy) -> Vec<StockRow> {
    let mut groups: HashMap<(Uuid, Option<Uuid>), StockRow> = HashMap::new();

    for m in movements {
        let warehouse = match group {
            GroupBy::Variant => None,
            GroupBy::VariantWarehouse => Some(m.warehouse_id),
        };
        let entry = groups
            .entry((m.variant_id, warehouse))
            .or_insert_with(|| StockRow {
                variant_id: m.variant_id,
                lot_code: m.lot_code.clone(),
                vintage: m.vintage,
                size_label: m.size_label.clone(),
                ml: m.ml,
                units_on_hand: 0,
                liters_on_hand: rust_decimal::Decimal::ZERO,
                warehouse_id: warehouse,
                warehouse_name: warehouse.map(|_| m.warehouse_name.clone()),
            });
        entry.units_on_hand += m.movement.signed_units(m.quantity_units);
    }

    let mut rows: Vec<StockRow> = groups
        .into_values()
        .map(|mut row| {
            row.liters_on_hand = StockRow::liters(row.units_on_hand, row.ml);
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.vintage
            .cmp(&a.vintage)
            .then_with(|| a.lot_code.cmp(&b.lot_code))
            .then_with(|| a.ml.cmp(&b.ml))
            .then_with(|| a.warehouse_name.cmp(&b.warehouse_name))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementKind;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn row(
        variant: Uuid,
        warehouse: Uuid,
        kind: MovementKind,
        qty: i32,
        vintage: i32,
        lot: &str,
        ml: i32,
    ) -> MovementRow {
        MovementRow {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            movement: kind,
            quantity_units: qty,
            note: None,
            variant_id: variant,
            vintage,
            lot_code: lot.to_string(),
            size_label: format!("{} ml", ml),
            ml,
            created_by: None,
            operator_email: None,
            warehouse_id: warehouse,
            warehouse_name: "Magazzino principale".to_string(),
        }
    }

    #[test]
    fn test_empty_ledger_empty_projection() {
        assert!(project(&[], GroupBy::Variant).is_empty());
        assert!(project(&[], GroupBy::VariantWarehouse).is_empty());
    }

    #[test]
    fn test_single_in_movement_round_trip() {
        let variant = Uuid::new_v4();
        let wh = Uuid::new_v4();
        let rows = project(
            &[row(variant, wh, MovementKind::In, 5, 2024, "A", 500)],
            GroupBy::Variant,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].units_on_hand, 5);
        assert_eq!(rows[0].liters_on_hand, Decimal::new(25, 1));
        assert!(rows[0].warehouse_id.is_none());
    }

    #[test]
    fn test_signed_fold() {
        let variant = Uuid::new_v4();
        let wh = Uuid::new_v4();
        let movements = vec![
            row(variant, wh, MovementKind::In, 10, 2024, "A", 750),
            row(variant, wh, MovementKind::Out, 4, 2024, "A", 750),
            row(variant, wh, MovementKind::Adjust, -2, 2024, "A", 750),
            row(variant, wh, MovementKind::Adjust, 1, 2024, "A", 750),
        ];
        let rows = project(&movements, GroupBy::Variant);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].units_on_hand, 5);
    }

    #[test]
    fn test_duplicate_appends_both_count() {
        let variant = Uuid::new_v4();
        let wh = Uuid::new_v4();
        let one = row(variant, wh, MovementKind::In, 5, 2024, "A", 500);
        let rows = project(&[one.clone(), one], GroupBy::Variant);
        assert_eq!(rows[0].units_on_hand, 10);
    }

    #[test]
    fn test_group_by_warehouse_partitions() {
        let variant = Uuid::new_v4();
        let wh1 = Uuid::new_v4();
        let wh2 = Uuid::new_v4();
        let movements = vec![
            row(variant, wh1, MovementKind::In, 6, 2023, "B", 500),
            row(variant, wh2, MovementKind::In, 4, 2023, "B", 500),
        ];
        let summed = project(&movements, GroupBy::Variant);
        assert_eq!(summed.len(), 1);
        assert_eq!(summed[0].units_on_hand, 10);

        let by_wh = project(&movements, GroupBy::VariantWarehouse);
        assert_eq!(by_wh.len(), 2);
        assert!(by_wh.iter().all(|r| r.units_on_hand > 0));
        assert!(by_wh.iter().all(|r| r.warehouse_id.is_some()));
    }

    #[test]
    fn test_display_ordering() {
        let wh = Uuid::new_v4();
        let movements = vec![
            row(Uuid::new_v4(), wh, MovementKind::In, 1, 2023, "B", 500),
            row(Uuid::new_v4(), wh, MovementKind::In, 1, 2024, "A", 750),
            row(Uuid::new_v4(), wh, MovementKind::In, 1, 2024, "A", 250),
            row(Uuid::new_v4(), wh, MovementKind::In, 1, 2024, "B", 500),
            row(Uuid::new_v4(), wh, MovementKind::In, 1, 2023, "A", 1000),
        ];
        let rows = project(&movements, GroupBy::Variant);
        let keys: Vec<(i32, String, i32)> = rows
            .iter()
            .map(|r| (r.vintage, r.lot_code.clone(), r.ml))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2024, "A".to_string(), 250),
                (2024, "A".to_string(), 750),
                (2024, "B".to_string(), 500),
                (2023, "A".to_string(), 1000),
                (2023, "B".to_string(), 500),
            ]
        );
    }
}
