//! Authentication and authorization tests
//!
//! Property-based and unit tests for:
//! - Role parsing at the identity boundary
//! - Movement-recording capability gating

use proptest::prelude::*;

use shared::models::CurrentIdentity;
use shared::types::{can_record_movements, Role};
use uuid::Uuid;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate valid role name strings
fn role_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("viewer".to_string()),
        Just("operator".to_string()),
        Just("admin".to_string()),
    ]
}

/// Generate arbitrary role-ish strings, mostly invalid
fn role_like_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,12}"
}

fn identity(roles: Vec<Role>) -> CurrentIdentity {
    CurrentIdentity {
        user_id: Uuid::new_v4(),
        email: "op@frantoio.it".to_string(),
        roles,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Only operator and admin may record movements
    #[test]
    fn test_recording_capability() {
        assert!(!identity(vec![]).can_record_movements());
        assert!(!identity(vec![Role::Viewer]).can_record_movements());
        assert!(identity(vec![Role::Operator]).can_record_movements());
        assert!(identity(vec![Role::Admin]).can_record_movements());
        assert!(identity(vec![Role::Viewer, Role::Operator]).can_record_movements());
    }

    /// Role strings parse exhaustively and reject unknown values
    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("viewer"), Some(Role::Viewer));
        assert_eq!(Role::from_str("operator"), Some(Role::Operator));
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("owner"), None);
        assert_eq!(Role::from_str("ADMIN"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Every known role string round-trips through parse and as_str
    #[test]
    fn prop_role_round_trip(role_str in role_strategy()) {
        let role = Role::from_str(&role_str).unwrap();
        prop_assert_eq!(role.as_str(), role_str);
    }

    /// The capability gate holds exactly when operator or admin is present
    #[test]
    fn prop_capability_requires_operator_or_admin(
        role_strs in prop::collection::vec(role_like_strategy(), 0..5)
    ) {
        let roles: Vec<Role> = role_strs.iter().filter_map(|r| Role::from_str(r)).collect();
        let expected = roles
            .iter()
            .any(|r| matches!(r, Role::Operator | Role::Admin));
        prop_assert_eq!(can_record_movements(&roles), expected);
    }

    /// Viewer-only membership never grants recording
    #[test]
    fn prop_viewers_never_record(n in 0usize..5) {
        let roles = vec![Role::Viewer; n];
        prop_assert!(!can_record_movements(&roles));
    }
}
