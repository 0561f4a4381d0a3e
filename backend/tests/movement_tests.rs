//! Movement recorder and query engine tests
//!
//! Tests for the movement ledger including:
//! - Quantity normalization for every movement kind
//! - Pagination math over the fixed history page size
//! - Literal matching of escaped search wildcards
//! - CSV export quoting
//! - Page reset and stale-response suppression in the history view

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use shared::export::movements_to_csv;
use shared::history::{page_offset, total_pages, HistoryState, LogView, PAGE_SIZE};
use shared::models::{MovementKind, MovementRow};
use shared::validation::{clamp_quantity, normalize_quantity, search_pattern};

fn sample_row(note: Option<&str>, operator: Option<&str>) -> MovementRow {
    MovementRow {
        id: Uuid::new_v4(),
        created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        movement: MovementKind::In,
        quantity_units: 5,
        note: note.map(String::from),
        variant_id: Uuid::new_v4(),
        vintage: 2024,
        lot_code: "A".to_string(),
        size_label: "500 ml".to_string(),
        ml: 500,
        created_by: None,
        operator_email: operator.map(String::from),
        warehouse_id: Uuid::new_v4(),
        warehouse_name: "Magazzino principale".to_string(),
    }
}

/// Minimal ILIKE evaluator supporting `%`, `_` and backslash escapes, used
/// to check the literal-matching contract of escaped search terms without
/// a database.
fn ilike_match(pattern: &str, text: &str) -> bool {
    fn matches(p: &[char], t: &[char]) -> bool {
        match p {
            [] => t.is_empty(),
            ['%', rest @ ..] => (0..=t.len()).any(|i| matches(rest, &t[i..])),
            ['\\', c, rest @ ..] => match t {
                [tc, t2 @ ..] => tc == c && matches(rest, t2),
                [] => false,
            },
            ['_', rest @ ..] => match t {
                [_, t2 @ ..] => matches(rest, t2),
                [] => false,
            },
            [c, rest @ ..] => match t {
                [tc, t2 @ ..] => tc == c && matches(rest, t2),
                [] => false,
            },
        }
    }
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    let t: Vec<char> = text.to_lowercase().chars().collect();
    matches(&p, &t)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// in/out input below 1 or unparseable coerces to 1
    #[test]
    fn test_normalize_in_out() {
        for kind in [MovementKind::In, MovementKind::Out] {
            assert_eq!(normalize_quantity("", kind), 1);
            assert_eq!(normalize_quantity("0", kind), 1);
            assert_eq!(normalize_quantity("-5", kind), 1);
            assert_eq!(normalize_quantity("venti", kind), 1);
            assert_eq!(normalize_quantity("3", kind), 3);
        }
    }

    /// adjust input of zero or unparseable coerces to -1; signed values pass
    #[test]
    fn test_normalize_adjust() {
        assert_eq!(normalize_quantity("0", MovementKind::Adjust), -1);
        assert_eq!(normalize_quantity("", MovementKind::Adjust), -1);
        assert_eq!(normalize_quantity("7", MovementKind::Adjust), 7);
        assert_eq!(normalize_quantity("-3", MovementKind::Adjust), -3);
    }

    /// The integer-level clamp applied by the recorder matches the
    /// free-text normalization
    #[test]
    fn test_clamp_matches_normalize() {
        for n in [-10, -1, 0, 1, 7] {
            for kind in [MovementKind::In, MovementKind::Out, MovementKind::Adjust] {
                assert_eq!(clamp_quantity(kind, n), normalize_quantity(&n.to_string(), kind));
            }
        }
    }

    /// 120 matching rows at page size 50 paginate as 50/50/20 with a
    /// constant total
    #[test]
    fn test_pagination_120_rows() {
        let all: Vec<i32> = (0..120).collect();
        let total = all.len() as i64;

        let page = |p: u32| -> Vec<i32> {
            let from = page_offset(p, PAGE_SIZE) as usize;
            all.iter()
                .skip(from)
                .take(PAGE_SIZE as usize)
                .copied()
                .collect()
        };

        assert_eq!(page(1).len(), 50);
        assert_eq!(page(2).len(), 50);
        assert_eq!(page(3).len(), 20);
        assert_eq!(total, 120);
        assert_eq!(total_pages(total, PAGE_SIZE), 3);
    }

    /// Total pages is at least 1 even with no matches
    #[test]
    fn test_total_pages_minimum() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
    }

    /// A search term containing % matches only literal occurrences
    #[test]
    fn test_percent_matches_literally() {
        let pattern = search_pattern("100%").unwrap();
        assert!(ilike_match(&pattern, "sconto 100% applicato"));
        assert!(!ilike_match(&pattern, "sconto 1000 unità"));
    }

    /// A search term containing _ matches only literal occurrences
    #[test]
    fn test_underscore_matches_literally() {
        let pattern = search_pattern("lotto_a").unwrap();
        assert!(ilike_match(&pattern, "nota lotto_a rettifica"));
        assert!(!ilike_match(&pattern, "nota lottoXa rettifica"));
    }

    /// Search is a case-insensitive substring match
    #[test]
    fn test_search_case_insensitive() {
        let pattern = search_pattern("Frantoio").unwrap();
        assert!(ilike_match(&pattern, "op@FRANTOIO.it"));
        assert!(ilike_match(&pattern, "consegna al frantoio"));
    }

    /// A note containing a double quote round-trips with the quote doubled
    #[test]
    fn test_csv_quote_doubling() {
        let csv = movements_to_csv(&[sample_row(Some(r#"He said "ok""#), None)]).unwrap();
        assert!(csv.contains(r#""He said ""ok""""#));
    }

    /// Export columns keep the fixed order
    #[test]
    fn test_csv_column_order() {
        let csv = movements_to_csv(&[sample_row(Some("carico"), Some("op@frantoio.it"))]).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            r#""Data","Tipo","Magazzino","Annata","Lotto","Formato","Qtà","Nota","Operatore","Variante""#
        );
    }

    /// Changing any filter resets the page to 1
    #[test]
    fn test_filter_change_resets_page() {
        let mut state = HistoryState::new();
        state.set_page(3);
        state.set_search(Some("scarto".to_string()));
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_kind(Some(MovementKind::Adjust));
        assert_eq!(state.page(), 1);
    }

    /// A response for an older request never overwrites the newer result,
    /// and a failed read keeps the last-good rows visible
    #[test]
    fn test_stale_and_failed_reads() {
        let mut view = LogView::new();

        let first = view.begin_request();
        let second = view.begin_request();
        assert!(view.apply_success(second, vec![sample_row(None, None)], 1));
        assert!(!view.apply_success(first, vec![], 0));
        assert_eq!(view.rows().len(), 1);

        let third = view.begin_request();
        assert!(view.apply_error(third, "connection reset"));
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.error(), Some("connection reset"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// in/out normalization never yields a value below 1
        #[test]
        fn prop_in_out_at_least_one(raw in "\\PC*") {
            prop_assert!(normalize_quantity(&raw, MovementKind::In) >= 1);
            prop_assert!(normalize_quantity(&raw, MovementKind::Out) >= 1);
        }

        /// adjust normalization never yields zero
        #[test]
        fn prop_adjust_nonzero(raw in "\\PC*") {
            prop_assert!(normalize_quantity(&raw, MovementKind::Adjust) != 0);
        }

        /// Every page except the last is full, and row counts add up to the
        /// total
        #[test]
        fn prop_pages_partition_the_result(total in 0i64..10_000) {
            let pages = total_pages(total, PAGE_SIZE);
            prop_assert!(pages >= 1);

            let mut seen = 0i64;
            for page in 1..=pages {
                let from = page_offset(page, PAGE_SIZE);
                let len = (total - from).clamp(0, i64::from(PAGE_SIZE));
                if page < pages {
                    prop_assert_eq!(len, i64::from(PAGE_SIZE));
                }
                seen += len;
            }
            prop_assert_eq!(seen, total);
        }

        /// An escaped term always matches text containing it literally
        #[test]
        fn prop_escaped_term_matches_itself(term in "[a-z%_\\\\]{1,12}") {
            let pattern = search_pattern(&term).unwrap();
            let text = format!("prefix {} suffix", term);
            prop_assert!(ilike_match(&pattern, &text));
        }

        /// CSV output always has one record per row plus the header
        #[test]
        fn prop_csv_record_count(notes in prop::collection::vec("[a-zA-Z \"',;]{0,20}", 0..10)) {
            let rows: Vec<MovementRow> = notes
                .iter()
                .map(|n| sample_row(Some(n), None))
                .collect();
            let csv = movements_to_csv(&rows).unwrap();
            // every field is quoted, so embedded newlines are absent here
            prop_assert_eq!(csv.lines().count(), rows.len() + 1);
        }
    }
}
