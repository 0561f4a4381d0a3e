//! User identity as seen by this core

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// The authenticated actor: id, display identity, role memberships
///
/// Produced by the identity provider; this core treats role membership as an
/// opaque authorization input it does not compute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<Role>,
}

impl CurrentIdentity {
    pub fn can_record_movements(&self) -> bool {
        crate::types::can_record_movements(&self.roles)
    }
}
