//! Validation and normalization utilities for Gestione Olio
//!
//! Quantity normalization runs in the browser on every keystroke (via the
//! WASM module) and once more at submission; the backend applies the same
//! integer-level clamp before appending to the ledger.

use crate::models::MovementKind;

/// Clamp an already-parsed quantity to the valid range for a movement kind.
///
/// `in`/`out` quantities are positive whole numbers (direction is carried by
/// the kind, not the sign); anything below 1 coerces to 1. `adjust` is any
/// nonzero signed integer; zero coerces to -1.
pub fn clamp_quantity(kind: MovementKind, quantity: i32) -> i32 {
    match kind {
        MovementKind::In | MovementKind::Out => {
            if quantity < 1 {
                1
            } else {
                quantity
            }
        }
        MovementKind::Adjust => {
            if quantity == 0 {
                -1
            } else {
                quantity
            }
        }
    }
}

/// Normalize free-text quantity input to a valid quantity for the kind.
///
/// Free-text entry can transiently hold invalid states (empty string, lone
/// minus sign, non-digit characters); parse failures coerce the same way an
/// out-of-range value does.
pub fn normalize_quantity(raw: &str, kind: MovementKind) -> i32 {
    let parsed = raw.trim().parse::<i32>().unwrap_or(0);
    clamp_quantity(kind, parsed)
}

/// Escape `\`, `%` and `_` in a search term so a LIKE/ILIKE pattern matches
/// them literally instead of as wildcards.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Build a case-insensitive substring pattern from raw search input.
///
/// Returns `None` for blank input (no search constraint).
pub fn search_pattern(raw: &str) -> Option<String> {
    let term = raw.trim();
    if term.is_empty() {
        None
    } else {
        Some(format!("%{}%", escape_like(term)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_in_out_floor() {
        for kind in [MovementKind::In, MovementKind::Out] {
            assert_eq!(normalize_quantity("", kind), 1);
            assert_eq!(normalize_quantity("0", kind), 1);
            assert_eq!(normalize_quantity("-5", kind), 1);
            assert_eq!(normalize_quantity("abc", kind), 1);
            assert_eq!(normalize_quantity("-", kind), 1);
            assert_eq!(normalize_quantity("12", kind), 12);
        }
    }

    #[test]
    fn test_normalize_adjust() {
        assert_eq!(normalize_quantity("0", MovementKind::Adjust), -1);
        assert_eq!(normalize_quantity("", MovementKind::Adjust), -1);
        assert_eq!(normalize_quantity("7", MovementKind::Adjust), 7);
        assert_eq!(normalize_quantity("-3", MovementKind::Adjust), -3);
        assert_eq!(normalize_quantity("-", MovementKind::Adjust), -1);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_search_pattern() {
        assert_eq!(search_pattern("  "), None);
        assert_eq!(search_pattern(""), None);
        assert_eq!(search_pattern(" olio "), Some("%olio%".to_string()));
        assert_eq!(search_pattern("50%_"), Some("%50\\%\\_%".to_string()));
    }

    proptest! {
        /// `in`/`out` normalization never yields a value below 1, whatever
        /// the input string.
        #[test]
        fn prop_in_out_never_below_one(raw in "\\PC*") {
            prop_assert!(normalize_quantity(&raw, MovementKind::In) >= 1);
            prop_assert!(normalize_quantity(&raw, MovementKind::Out) >= 1);
        }

        /// `adjust` normalization never yields zero.
        #[test]
        fn prop_adjust_never_zero(raw in "\\PC*") {
            prop_assert!(normalize_quantity(&raw, MovementKind::Adjust) != 0);
        }

        /// Valid in-range input passes through unchanged.
        #[test]
        fn prop_valid_input_preserved(n in 1i32..=1_000_000) {
            let s = n.to_string();
            prop_assert_eq!(normalize_quantity(&s, MovementKind::In), n);
            prop_assert_eq!(normalize_quantity(&s, MovementKind::Out), n);
            prop_assert_eq!(normalize_quantity(&s, MovementKind::Adjust), n);
        }

        /// Escaped patterns contain no unescaped wildcard characters.
        #[test]
        fn prop_escape_neutralizes_wildcards(term in "\\PC*") {
            let escaped = escape_like(&term);
            let mut chars = escaped.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    // consumes the escaped character
                    chars.next();
                } else {
                    prop_assert!(c != '%' && c != '_');
                }
            }
        }
    }
}
