//! # Balance Ledger
//!
//! Account balances and the running total supply.
//!
//! ## Invariants
//!
//! - The sum of all balances equals `total_supply`.
//! - Balances are unsigned; a debit larger than the balance is rejected
//!   before anything is written.
//! - Overflow is reported, never wrapped.
//!
//! Zero balances are not stored, so an account that spends down to zero
//! reads the same as one that was never referenced.

use super::errors::{DebitPurpose, LedgerError};
use super::value_objects::{Address, U256};
use std::collections::HashMap;

/// Whether a credit or debit also moves total supply.
///
/// Transfers are `Unchanged`; mint and burn are `Adjusted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplyEffect {
    /// Supply is not touched.
    Unchanged,
    /// Supply moves with the balance.
    Adjusted,
}

/// Account → balance mapping plus total supply.
#[derive(Clone, Debug, Default)]
pub struct BalanceLedger {
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

impl BalanceLedger {
    /// Create an empty ledger with zero supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account`, zero if it was never credited.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Fails unless `account` holds at least `amount`.
    pub fn ensure_covers(
        &self,
        account: &Address,
        amount: U256,
        purpose: DebitPurpose,
    ) -> Result<(), LedgerError> {
        self.remaining_after(account, amount, purpose).map(|_| ())
    }

    /// Add `amount` to `account`.
    pub fn credit(
        &mut self,
        account: Address,
        amount: U256,
        effect: SupplyEffect,
    ) -> Result<(), LedgerError> {
        let supply = match effect {
            SupplyEffect::Adjusted => self
                .total_supply
                .checked_add(amount)
                .ok_or_else(|| LedgerError::overflow("supply increase"))?,
            SupplyEffect::Unchanged => self.total_supply,
        };
        let balance = self
            .balance_of(&account)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::overflow("balance credit"))?;

        self.store(account, balance);
        self.total_supply = supply;
        Ok(())
    }

    /// Subtract `amount` from `account`.
    pub fn debit(
        &mut self,
        account: Address,
        amount: U256,
        effect: SupplyEffect,
        purpose: DebitPurpose,
    ) -> Result<(), LedgerError> {
        let remaining = self.remaining_after(&account, amount, purpose)?;
        let supply = match effect {
            SupplyEffect::Adjusted => self
                .total_supply
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::overflow("supply decrease"))?,
            SupplyEffect::Unchanged => self.total_supply,
        };

        self.store(account, remaining);
        self.total_supply = supply;
        Ok(())
    }

    /// Supply-neutral move of `amount` from one account to another.
    ///
    /// Both new balances are computed before either is written. Moving to
    /// oneself only checks that the balance covers `amount`.
    pub fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let from_after = self.remaining_after(&from, amount, DebitPurpose::Transfer)?;
        if from == to {
            return Ok(());
        }
        let to_after = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::overflow("balance credit"))?;

        self.store(from, from_after);
        self.store(to, to_after);
        Ok(())
    }

    /// Accounts with a non-zero balance.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    /// Number of accounts with a non-zero balance.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    fn remaining_after(
        &self,
        account: &Address,
        amount: U256,
        purpose: DebitPurpose,
    ) -> Result<U256, LedgerError> {
        let available = self.balance_of(account);
        available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account: *account,
                required: amount,
                available,
                purpose,
            })
    }

    fn store(&mut self, account: Address, balance: U256) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}
