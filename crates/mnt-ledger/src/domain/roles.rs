//! # Role Registry
//!
//! Set-membership facts `(role, account)` that gate supply changes.
//! Grants persist; there is no revocation path.

use super::errors::LedgerError;
use super::value_objects::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Capabilities an account can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May grant roles. Held by the deployer from construction.
    Admin,
    /// May mint new supply.
    Minter,
    /// May burn existing supply.
    Burner,
}

impl Role {
    /// Canonical role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Admin => "DEFAULT_ADMIN_ROLE",
            Self::Minter => "MINTER_ROLE",
            Self::Burner => "BURNER_ROLE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which accounts hold which roles.
#[derive(Clone, Debug, Default)]
pub struct RoleRegistry {
    grants: HashSet<(Role, Address)>,
}

impl RoleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.grants.contains(&(role, *account))
    }

    /// Record a grant. Returns false if it was already present.
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.grants.insert((role, account))
    }

    /// Fails with `Unauthorized` unless `account` holds `role`.
    pub fn require(&self, role: Role, account: &Address) -> Result<(), LedgerError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                account: *account,
                role,
            })
        }
    }

    /// All recorded grants, in no particular order.
    pub fn grants(&self) -> impl Iterator<Item = (Role, Address)> + '_ {
        self.grants.iter().copied()
    }
}
