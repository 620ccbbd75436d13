//! # Ledger Engine
//!
//! Single-writer state machine implementing transfer, delegated transfer,
//! approve, mint, burn and role grants.
//!
//! ## Atomicity
//!
//! Every precondition is checked before the first write, and the write that
//! could still fail (the balance move) runs before the allowance is spent.
//! A returned error therefore always means the state is unchanged.
//!
//! ## Check order
//!
//! | Operation | Order |
//! |-----------|-------|
//! | `transfer` | sender, recipient, fee inflation, balance |
//! | `approve` | owner, delegate |
//! | `transfer_from` | owner, recipient, delegate, fee inflation, allowance, balance |
//! | `mint` | Minter role, recipient, supply overflow |
//! | `burn` | Burner role, sender, balance |
//! | `grant_role` | Admin role, grantee |

use super::address;
use super::balances::SupplyEffect;
use super::entities::{Genesis, LedgerEvent, Receipt, TokenMetadata};
use super::errors::{DebitPurpose, LedgerError, Party};
use super::fees::FeeSchedule;
use super::roles::Role;
use super::state::LedgerState;
use super::value_objects::{Address, U256};
use tracing::{debug, trace};

/// The token ledger.
#[derive(Clone, Debug)]
pub struct LedgerEngine {
    state: LedgerState,
    fees: FeeSchedule,
}

impl LedgerEngine {
    /// Construct a ledger. The deployer receives the whole initial supply
    /// and the admin role; the receipt carries the genesis mint.
    pub fn new(genesis: Genesis) -> Result<(Self, Receipt), LedgerError> {
        address::validate(&genesis.deployer, Party::Recipient)?;

        let mut state = LedgerState::new(genesis.metadata);
        state.balances.credit(
            genesis.deployer,
            genesis.initial_supply,
            SupplyEffect::Adjusted,
        )?;
        state.roles.grant(Role::Admin, genesis.deployer);

        debug!(
            deployer = ?genesis.deployer,
            initial_supply = %genesis.initial_supply,
            "Ledger constructed"
        );

        let engine = Self {
            state,
            fees: genesis.fees,
        };
        let receipt = Receipt::single(LedgerEvent::Transfer {
            from: Address::ZERO,
            to: genesis.deployer,
            amount: genesis.initial_supply,
        });
        Ok((engine, receipt))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.state.metadata.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.state.metadata.symbol
    }

    /// Decimal places, always 18.
    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.state.metadata.decimals
    }

    /// Token metadata.
    #[must_use]
    pub fn metadata(&self) -> &TokenMetadata {
        self.state.metadata()
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.state.balances.total_supply()
    }

    /// Balance of `account`, zero if unknown.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.state.balances.balance_of(account)
    }

    /// Amount `delegate` may still spend from `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, delegate: &Address) -> U256 {
        self.state.allowances.get(owner, delegate)
    }

    /// Returns true if `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.roles.has_role(role, account)
    }

    /// Transfer fee rate.
    #[must_use]
    pub fn fee_schedule(&self) -> FeeSchedule {
        self.fees
    }

    /// Read-only view of the whole state.
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Move `amount + fee(amount)` from the caller to `to`.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        address::validate(&caller, Party::Sender)?;
        address::validate(&to, Party::Recipient)?;
        let gross = self.fees.inflate(amount)?;

        self.state.balances.move_balance(caller, to, gross)?;

        trace!(from = ?caller, to = ?to, nominal = %amount, gross = %gross, "transfer");
        Ok(Receipt::single(LedgerEvent::Transfer {
            from: caller,
            to,
            amount: gross,
        }))
    }

    /// Set the caller's allowance for `delegate` to `amount`.
    pub fn approve(
        &mut self,
        caller: Address,
        delegate: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        address::validate(&caller, Party::Owner)?;
        address::validate(&delegate, Party::Delegate)?;

        self.state.allowances.set(caller, delegate, amount);

        trace!(owner = ?caller, delegate = ?delegate, amount = %amount, "approve");
        Ok(Receipt::single(LedgerEvent::Approval {
            owner: caller,
            delegate,
            amount,
        }))
    }

    /// Move `amount + fee(amount)` from `from` to `to`, spending the caller's
    /// allowance over `from`.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        address::validate(&from, Party::Owner)?;
        address::validate(&to, Party::Recipient)?;
        address::validate(&caller, Party::Delegate)?;
        let gross = self.fees.inflate(amount)?;

        self.state.allowances.ensure_covers(&from, &caller, gross)?;
        self.state.balances.move_balance(from, to, gross)?;
        self.state.allowances.consume(from, caller, gross)?;

        trace!(
            delegate = ?caller,
            from = ?from,
            to = ?to,
            nominal = %amount,
            gross = %gross,
            "transfer_from"
        );
        Ok(Receipt::single(LedgerEvent::Transfer {
            from,
            to,
            amount: gross,
        }))
    }

    /// Create `amount` new tokens for `to`. Requires [`Role::Minter`].
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        self.state.roles.require(Role::Minter, &caller)?;
        address::validate(&to, Party::Recipient)?;

        self.state
            .balances
            .credit(to, amount, SupplyEffect::Adjusted)?;

        debug!(minter = ?caller, to = ?to, amount = %amount, "mint");
        Ok(Receipt::single(LedgerEvent::Transfer {
            from: Address::ZERO,
            to,
            amount,
        }))
    }

    /// Destroy `amount` tokens held by `from`. Requires [`Role::Burner`].
    pub fn burn(
        &mut self,
        caller: Address,
        from: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        self.state.roles.require(Role::Burner, &caller)?;
        address::validate(&from, Party::Sender)?;

        self.state.balances.debit(
            from,
            amount,
            SupplyEffect::Adjusted,
            DebitPurpose::Burn,
        )?;

        debug!(burner = ?caller, from = ?from, amount = %amount, "burn");
        Ok(Receipt::single(LedgerEvent::Transfer {
            from,
            to: Address::ZERO,
            amount,
        }))
    }

    /// Grant `role` to `account`. Requires [`Role::Admin`]. Emits
    /// `RoleGranted` only when the grant is new.
    pub fn grant_role(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<Receipt, LedgerError> {
        self.state.roles.require(Role::Admin, &caller)?;
        address::validate(&account, Party::Grantee)?;

        if !self.state.roles.grant(role, account) {
            return Ok(Receipt::empty());
        }

        debug!(admin = ?caller, role = %role, account = ?account, "grant_role");
        Ok(Receipt::single(LedgerEvent::RoleGranted {
            role,
            account,
            sender: caller,
        }))
    }
}
