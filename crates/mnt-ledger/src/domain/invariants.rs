//! # Domain Invariants
//!
//! State-level rules that must hold after every operation:
//!
//! - Supply conservation: the sum of all balances equals total supply.
//! - Null isolation: the null address holds no balance and takes part in
//!   no allowance.
//!
//! Non-negativity is carried by the unsigned balance type and role gating by
//! the engine's check order; neither needs a state scan.
//!
//! These checks walk every account and are meant for audits and tests, not
//! for the per-operation path.

use super::state::LedgerState;
use super::value_objects::{Address, U256};

/// A broken invariant found by [`check_all_invariants`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances do not add up to total supply. `summed` is `None` when the
    /// sum itself overflowed.
    SupplyMismatch {
        /// Recorded total supply.
        recorded: U256,
        /// Sum of balances.
        summed: Option<U256>,
    },
    /// The null address holds a balance.
    NullAddressBalance(U256),
    /// The null address owns or is delegated an allowance.
    NullAddressAllowance {
        /// Allowance owner.
        owner: Address,
        /// Allowance spender.
        delegate: Address,
    },
}

/// Sum of every balance, `None` on overflow.
#[must_use]
pub fn sum_of_balances(state: &LedgerState) -> Option<U256> {
    state
        .balances()
        .accounts()
        .try_fold(U256::zero(), |acc, (_, balance)| acc.checked_add(*balance))
}

/// Supply conservation.
#[must_use]
pub fn check_supply_conservation(state: &LedgerState) -> bool {
    sum_of_balances(state) == Some(state.balances().total_supply())
}

/// Null-address isolation.
#[must_use]
pub fn check_null_address_isolation(state: &LedgerState) -> bool {
    state.balances().balance_of(&Address::ZERO).is_zero()
        && state
            .allowances()
            .entries()
            .all(|((owner, delegate), _)| !owner.is_zero() && !delegate.is_zero())
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &LedgerState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !check_supply_conservation(state) {
        violations.push(InvariantViolation::SupplyMismatch {
            recorded: state.balances().total_supply(),
            summed: sum_of_balances(state),
        });
    }

    let null_balance = state.balances().balance_of(&Address::ZERO);
    if !null_balance.is_zero() {
        violations.push(InvariantViolation::NullAddressBalance(null_balance));
    }

    for ((owner, delegate), _) in state.allowances().entries() {
        if owner.is_zero() || delegate.is_zero() {
            violations.push(InvariantViolation::NullAddressAllowance {
                owner: *owner,
                delegate: *delegate,
            });
        }
    }

    violations
}
