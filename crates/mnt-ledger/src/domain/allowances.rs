//! # Allowance Registry
//!
//! Owner → delegate spending limits. [`UNLIMITED_ALLOWANCE`] is never
//! decremented by [`AllowanceRegistry::consume`].

use super::errors::LedgerError;
use super::value_objects::{Address, U256, UNLIMITED_ALLOWANCE};
use std::collections::HashMap;

/// Spending limits keyed by `(owner, delegate)`.
#[derive(Clone, Debug, Default)]
pub struct AllowanceRegistry {
    allowances: HashMap<(Address, Address), U256>,
}

impl AllowanceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current allowance, zero for an unset pair.
    #[must_use]
    pub fn get(&self, owner: &Address, delegate: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *delegate))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the allowance unconditionally.
    pub fn set(&mut self, owner: Address, delegate: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, delegate));
        } else {
            self.allowances.insert((owner, delegate), amount);
        }
    }

    /// Returns true if the pair holds the unlimited sentinel.
    #[must_use]
    pub fn is_unlimited(&self, owner: &Address, delegate: &Address) -> bool {
        self.get(owner, delegate) == UNLIMITED_ALLOWANCE
    }

    /// Fails unless `delegate` may spend `amount` of `owner`'s balance.
    pub fn ensure_covers(
        &self,
        owner: &Address,
        delegate: &Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.remaining_after(owner, delegate, amount).map(|_| ())
    }

    /// Spend `amount` of the allowance. Unlimited allowances are left as is.
    pub fn consume(
        &mut self,
        owner: Address,
        delegate: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        if let Some(remaining) = self.remaining_after(&owner, &delegate, amount)? {
            self.set(owner, delegate, remaining);
        }
        Ok(())
    }

    /// Non-zero allowances as `((owner, delegate), amount)`.
    pub fn entries(&self) -> impl Iterator<Item = (&(Address, Address), &U256)> {
        self.allowances.iter()
    }

    /// `None` for an unlimited allowance, which needs no write.
    fn remaining_after(
        &self,
        owner: &Address,
        delegate: &Address,
        amount: U256,
    ) -> Result<Option<U256>, LedgerError> {
        let current = self.get(owner, delegate);
        if current == UNLIMITED_ALLOWANCE {
            return Ok(None);
        }
        current
            .checked_sub(amount)
            .map(Some)
            .ok_or(LedgerError::InsufficientAllowance {
                owner: *owner,
                delegate: *delegate,
                required: amount,
                available: current,
            })
    }
}
