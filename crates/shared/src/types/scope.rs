//! Ledger scoping.

use serde::{Deserialize, Serialize};

use super::id::OrganizationId;

/// The ownership scope a ledger record lives in.
///
/// Every account and transaction group belongs to exactly one scope.
/// Uniqueness constraints (account codes, active account names) and all
/// balance queries are evaluated per scope, never across scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "organization_id", rename_all = "lowercase")]
pub enum Scope {
    /// Personal records with no backing organization.
    Personal,
    /// Records owned by a specific organization.
    Organization(OrganizationId),
}

impl Scope {
    /// Returns the organization id, if this is an organization scope.
    #[must_use]
    pub const fn organization_id(&self) -> Option<OrganizationId> {
        match self {
            Self::Personal => None,
            Self::Organization(id) => Some(*id),
        }
    }

    /// Returns true if this is a personal scope.
    #[must_use]
    pub const fn is_personal(&self) -> bool {
        matches!(self, Self::Personal)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Personal => write!(f, "personal"),
            Self::Organization(id) => write!(f, "org:{id}"),
        }
    }
}
