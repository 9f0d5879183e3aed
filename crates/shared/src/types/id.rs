//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `DebtId` where an `IncomeSourceId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(IncomeSourceId, "Unique identifier for an income source.");
typed_id!(
    ObligationId,
    "Unique identifier for a goal, debt, or investment."
);
typed_id!(InstallmentId, "Unique identifier for a debt installment.");
typed_id!(BudgetCategoryId, "Unique identifier for a budget category.");
typed_id!(SubscriptionId, "Unique identifier for a recurring subscription.");
typed_id!(ExpenseId, "Unique identifier for a recorded expense.");

impl InstallmentId {
    /// Derives the installment ID for a given position in a debt's schedule.
    ///
    /// The result is a UUID v5 namespaced by the debt ID, so the same debt and
    /// sequence always produce the same installment ID.
    #[must_use]
    pub fn derive(debt_id: ObligationId, sequence: u32) -> Self {
        Self(Uuid::new_v5(
            &debt_id.into_inner(),
            format!("installment-{sequence}").as_bytes(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ObligationId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_display_and_parse() {
        let id = IncomeSourceId::new();
        let parsed = IncomeSourceId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
        assert!(IncomeSourceId::from_str("invalid").is_err());
    }

    #[test]
    fn test_installment_id_is_deterministic() {
        let debt = ObligationId::new();
        assert_eq!(InstallmentId::derive(debt, 3), InstallmentId::derive(debt, 3));
        assert_ne!(InstallmentId::derive(debt, 3), InstallmentId::derive(debt, 4));
        assert_ne!(
            InstallmentId::derive(debt, 1),
            InstallmentId::derive(ObligationId::new(), 1)
        );
    }
}
