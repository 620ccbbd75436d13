//! # Inbound Ports
//!
//! API trait defining what a token ledger can do. Every operation is
//! all-or-nothing: on `Err` no state has changed and no event was emitted.

use crate::domain::{Address, FeeSchedule, LedgerError, Receipt, Role, U256};

/// Token ledger API - inbound port.
pub trait TokenLedgerApi: Send + Sync {
    /// Token name.
    fn name(&self) -> String;

    /// Token symbol.
    fn symbol(&self) -> String;

    /// Decimal places.
    fn decimals(&self) -> u8;

    /// Sum of all balances.
    fn total_supply(&self) -> U256;

    /// Balance of `account`.
    fn balance_of(&self, account: &Address) -> U256;

    /// Remaining amount `delegate` may spend from `owner`.
    fn allowance(&self, owner: &Address, delegate: &Address) -> U256;

    /// Returns true if `account` holds `role`.
    fn has_role(&self, role: Role, account: &Address) -> bool;

    /// Transfer fee rate.
    fn fee_schedule(&self) -> FeeSchedule;

    /// Move `amount` plus fee from `caller` to `to`.
    fn transfer(&self, caller: Address, to: Address, amount: U256)
        -> Result<Receipt, LedgerError>;

    /// Set `caller`'s allowance for `delegate`.
    fn approve(
        &self,
        caller: Address,
        delegate: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError>;

    /// Move `amount` plus fee from `from` to `to` on `caller`'s allowance.
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError>;

    /// Create new supply for `to`.
    fn mint(&self, caller: Address, to: Address, amount: U256) -> Result<Receipt, LedgerError>;

    /// Destroy supply held by `from`.
    fn burn(&self, caller: Address, from: Address, amount: U256) -> Result<Receipt, LedgerError>;

    /// Grant `role` to `account`.
    fn grant_role(
        &self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<Receipt, LedgerError>;
}
