//! Owned ledger state. One instance per ledger; nothing is global.

use super::allowances::AllowanceRegistry;
use super::balances::BalanceLedger;
use super::entities::TokenMetadata;
use super::roles::RoleRegistry;

/// Balances, allowances, role grants and metadata of a single ledger.
#[derive(Clone, Debug, Default)]
pub struct LedgerState {
    pub(crate) metadata: TokenMetadata,
    pub(crate) balances: BalanceLedger,
    pub(crate) allowances: AllowanceRegistry,
    pub(crate) roles: RoleRegistry,
}

impl LedgerState {
    /// Empty state with the given metadata.
    #[must_use]
    pub fn new(metadata: TokenMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Token metadata.
    #[must_use]
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Balances and supply.
    #[must_use]
    pub fn balances(&self) -> &BalanceLedger {
        &self.balances
    }

    /// Allowances.
    #[must_use]
    pub fn allowances(&self) -> &AllowanceRegistry {
        &self.allowances
    }

    /// Role grants.
    #[must_use]
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }
}
