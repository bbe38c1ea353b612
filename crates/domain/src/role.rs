use std::str::FromStr;

use bouwdesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Privilege level held by exactly one profile at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Read-only portal visitor.
    Viewer,
    /// Site and planning operations staff.
    Operations,
    /// Human resources staff.
    Hr,
    /// Sales and tendering staff.
    Sales,
    /// Portal administrator.
    Admin,
    /// Company board.
    Directie,
}

impl Role {
    /// Returns the numeric rank used by the hierarchy.
    ///
    /// `Hr` and `Sales` share rank 2.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Viewer => 0,
            Self::Operations => 1,
            Self::Hr | Self::Sales => 2,
            Self::Admin => 3,
            Self::Directie => 4,
        }
    }

    /// Returns whether this role dominates `other`.
    ///
    /// Distinct roles of equal rank are incomparable: neither dominates the
    /// other, which keeps the relation antisymmetric.
    #[must_use]
    pub fn dominates(self, other: Self) -> bool {
        self == other || self.rank() > other.rank()
    }

    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Operations => "OPERATIONS",
            Self::Hr => "HR",
            Self::Sales => "SALES",
            Self::Admin => "ADMIN",
            Self::Directie => "DIRECTIE",
        }
    }

    /// Returns all known roles in rank order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Viewer,
            Role::Operations,
            Role::Hr,
            Role::Sales,
            Role::Admin,
            Role::Directie,
        ];

        ALL
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "VIEWER" => Ok(Self::Viewer),
            "OPERATIONS" => Ok(Self::Operations),
            "HR" => Ok(Self::Hr),
            "SALES" => Ok(Self::Sales),
            "ADMIN" => Ok(Self::Admin),
            "DIRECTIE" => Ok(Self::Directie),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::Role;

    fn any_role() -> impl Strategy<Value = Role> {
        proptest::sample::select(Role::all().to_vec())
    }

    #[test]
    fn role_roundtrip_storage_value() {
        for role in Role::all() {
            let restored = Role::from_str(role.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(Role::Viewer), *role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("viewer").is_err());
        assert!(Role::from_str("OWNER").is_err());
    }

    #[test]
    fn hr_and_sales_are_incomparable() {
        assert!(!Role::Hr.dominates(Role::Sales));
        assert!(!Role::Sales.dominates(Role::Hr));
        assert!(Role::Hr.dominates(Role::Operations));
        assert!(Role::Sales.dominates(Role::Viewer));
        assert!(Role::Admin.dominates(Role::Hr));
        assert!(Role::Directie.dominates(Role::Sales));
    }

    #[test]
    fn serde_uses_upper_case_names() {
        let encoded = serde_json::to_string(&Role::Directie).unwrap_or_default();
        assert_eq!(encoded, "\"DIRECTIE\"");
    }

    proptest! {
        #[test]
        fn dominance_is_antisymmetric(left in any_role(), right in any_role()) {
            if left.dominates(right) && right.dominates(left) {
                prop_assert_eq!(left, right);
            }
        }

        #[test]
        fn dominance_is_reflexive(role in any_role()) {
            prop_assert!(role.dominates(role));
        }

        #[test]
        fn dominance_is_transitive(a in any_role(), b in any_role(), c in any_role()) {
            if a.dominates(b) && b.dominates(c) {
                prop_assert!(a.dominates(c));
            }
        }

        #[test]
        fn higher_rank_always_dominates(left in any_role(), right in any_role()) {
            if left.rank() > right.rank() {
                prop_assert!(left.dominates(right));
                prop_assert!(!right.dominates(left));
            }
        }
    }
}
