//! # Domain Errors
//!
//! Error types for the token ledger. Every engine failure is a local
//! validation failure: the ledger state is unchanged when one is returned.

use super::roles::Role;
use super::value_objects::{Address, U256};
use std::fmt;
use thiserror::Error;

/// The part an address plays in an operation. Reported by
/// [`LedgerError::InvalidAddress`] so callers can tell which argument was null.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Party {
    /// The account whose balance is debited.
    Sender,
    /// The account whose balance is credited.
    Recipient,
    /// The account granting an allowance.
    Owner,
    /// The account spending an allowance.
    Delegate,
    /// The account receiving a role grant.
    Grantee,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sender => "sender",
            Self::Recipient => "recipient",
            Self::Owner => "owner",
            Self::Delegate => "delegate",
            Self::Grantee => "grantee",
        };
        f.write_str(name)
    }
}

/// Why a balance is being debited. Burn failures carry their own message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DebitPurpose {
    /// Value moving to another account.
    Transfer,
    /// Value leaving circulation.
    Burn,
}

impl fmt::Display for DebitPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => f.write_str("to transfer"),
            Self::Burn => f.write_str("to burn"),
        }
    }
}

/// Ledger operation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The null address was used as a balance-affecting party.
    #[error("invalid address: {party} must not be the null address")]
    InvalidAddress {
        /// Which argument was null.
        party: Party,
    },

    /// A debit exceeds the available balance.
    #[error("insufficient balance {purpose}: {account} holds {available}, required {required}")]
    InsufficientBalance {
        /// Account being debited.
        account: Address,
        /// Amount the operation needs.
        required: U256,
        /// Current balance.
        available: U256,
        /// Transfer or burn.
        purpose: DebitPurpose,
    },

    /// A delegated transfer exceeds a finite allowance.
    #[error("insufficient allowance: {delegate} may spend {available} of {owner}'s tokens, required {required}")]
    InsufficientAllowance {
        /// Allowance owner.
        owner: Address,
        /// Allowance spender.
        delegate: Address,
        /// Amount the operation needs.
        required: U256,
        /// Current allowance.
        available: U256,
    },

    /// The caller lacks the role the operation requires.
    #[error("unauthorized: {account} does not hold {role}")]
    Unauthorized {
        /// Caller.
        account: Address,
        /// Required role.
        role: Role,
    },

    /// A 256-bit quantity would overflow.
    #[error("arithmetic overflow during {operation}")]
    ArithmeticOverflow {
        /// What was being computed.
        operation: &'static str,
    },
}

impl LedgerError {
    pub(crate) fn overflow(operation: &'static str) -> Self {
        Self::ArithmeticOverflow { operation }
    }
}

/// Failure to parse an [`Address`] from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    /// Not valid hexadecimal.
    #[error("invalid address hex: {0}")]
    InvalidHex(String),

    /// Decoded to the wrong number of bytes.
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Fee schedules whose rate cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeeScheduleError {
    /// Division by zero.
    #[error("fee denominator must be non-zero")]
    ZeroDenominator,

    /// Rates above 100% are rejected.
    #[error("fee rate {numerator}/{denominator} exceeds 100%")]
    RateAboveOne {
        /// Rate numerator.
        numerator: u64,
        /// Rate denominator.
        denominator: u64,
    },
}
