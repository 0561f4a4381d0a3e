//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Role membership granted to a user
///
/// Roles are assigned externally (admin process); this core only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "viewer" => Some(Role::Viewer),
            "operator" => Some(Role::Operator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Whether a set of role memberships allows recording movements.
///
/// This is a presentation gate; the recorder enforces the same rule
/// server-side before any write.
pub fn can_record_movements(roles: &[Role]) -> bool {
    roles
        .iter()
        .any(|r| matches!(r, Role::Operator | Role::Admin))
}
