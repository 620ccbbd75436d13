//! # Domain Entities
//!
//! Token metadata, construction parameters, and the notifications each
//! successful operation emits.

use super::fees::FeeSchedule;
use super::roles::Role;
use super::value_objects::{Address, TOKEN_DECIMALS, U256};
use serde::{Deserialize, Serialize};

/// Default token name.
pub const DEFAULT_NAME: &str = "Manul Token";

/// Default token symbol.
pub const DEFAULT_SYMBOL: &str = "MNT";

/// Static token metadata, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places of the smallest unit. Always [`TOKEN_DECIMALS`].
    pub decimals: u8,
}

impl TokenMetadata {
    /// Metadata with the given name and symbol and 18 decimals.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: TOKEN_DECIMALS,
        }
    }
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_SYMBOL)
    }
}

/// Everything needed to construct a ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genesis {
    /// Token metadata.
    pub metadata: TokenMetadata,
    /// Receives the initial supply and the admin role.
    pub deployer: Address,
    /// Initial supply in smallest units.
    pub initial_supply: U256,
    /// Transfer fee rate.
    pub fees: FeeSchedule,
}

impl Genesis {
    /// Default metadata and reference fee rate.
    #[must_use]
    pub fn new(deployer: Address, initial_supply: U256) -> Self {
        Self {
            metadata: TokenMetadata::default(),
            deployer,
            initial_supply,
            fees: FeeSchedule::REFERENCE,
        }
    }

    /// Builder method to set the fee schedule.
    #[must_use]
    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    /// Builder method to set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TokenMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Notification emitted by a successful operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    /// Value moved. `from` is null for mints, `to` is null for burns.
    /// For transfers `amount` is the fee-inflated amount.
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        amount: U256,
    },
    /// An allowance was set.
    Approval {
        /// Allowance owner.
        owner: Address,
        /// Allowance spender.
        delegate: Address,
        /// New allowance.
        amount: U256,
    },
    /// A role was newly granted.
    RoleGranted {
        /// Role granted.
        role: Role,
        /// Account receiving the role.
        account: Address,
        /// Admin who granted it.
        sender: Address,
    },
}

impl LedgerEvent {
    /// Short event name, used as a log field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::RoleGranted { .. } => "RoleGranted",
        }
    }

    /// True for a Transfer from the null address.
    #[must_use]
    pub fn is_mint(&self) -> bool {
        matches!(self, Self::Transfer { from, .. } if from.is_zero())
    }

    /// True for a Transfer to the null address.
    #[must_use]
    pub fn is_burn(&self) -> bool {
        matches!(self, Self::Transfer { to, .. } if to.is_zero())
    }
}

/// Events emitted by one operation, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Emitted events.
    pub events: Vec<LedgerEvent>,
}

impl Receipt {
    pub(crate) fn single(event: LedgerEvent) -> Self {
        Self {
            events: vec![event],
        }
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Amount of the first Transfer event, if any.
    #[must_use]
    pub fn transferred(&self) -> Option<U256> {
        self.events.iter().find_map(|event| match event {
            LedgerEvent::Transfer { amount, .. } => Some(*amount),
            _ => None,
        })
    }
}
