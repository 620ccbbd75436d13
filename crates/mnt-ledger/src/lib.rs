//! # MNT Ledger - Manul Token
//!
//! Fungible token ledger with a proportional transfer fee, delegated
//! spending, and role-gated minting and burning.
//!
//! ## Token
//!
//! | Property | Value |
//! |----------|-------|
//! | Name | Manul Token |
//! | Symbol | MNT |
//! | Decimals | 18 |
//! | Transfer fee | 2%, added on top of the nominal amount |
//! | Unlimited allowance | `U256::MAX`, never decremented |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Supply conservation | `domain/balances.rs` - `BalanceLedger::credit`/`debit`/`move_balance` |
//! | No negative balances | unsigned `U256`, checked subtraction |
//! | Null address never holds or spends | `domain/address.rs` - `validate()` |
//! | Atomic operations | `domain/engine.rs` - all checks before the first write |
//! | Role-gated supply changes | `domain/roles.rs` - `RoleRegistry::require()` |
//!
//! ## Module Structure
//!
//! ```text
//! mnt-ledger/
//! ├── domain/      # Value objects, registries, fee math, engine
//! ├── ports/       # TokenLedgerApi (inbound), EventSink (outbound)
//! ├── adapters/    # InMemoryEventLog, BroadcastEventSink
//! ├── service.rs   # Locked service wrapper with stats
//! ├── config.rs    # TOML / env deployment config
//! └── units.rs     # Whole-token <-> smallest-unit conversion
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use mnt_ledger::prelude::*;
//! use std::sync::Arc;
//!
//! let owner = Address::repeat_byte(0x01);
//! let friend = Address::repeat_byte(0x02);
//!
//! let genesis = Genesis::new(owner, to_base_units(111));
//! let ledger = LedgerService::new(genesis, Arc::new(InMemoryEventLog::new())).unwrap();
//!
//! ledger.transfer(owner, friend, to_base_units(20)).unwrap();
//! assert_eq!(format_units(ledger.balance_of(&friend)), "20.4");
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod units;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        check_all_invariants, Address, DebitPurpose, FeeSchedule, Genesis, InvariantViolation,
        LedgerEngine, LedgerError, LedgerEvent, Party, Receipt, Role, TokenMetadata, U256,
        UNLIMITED_ALLOWANCE,
    };

    // Ports
    pub use crate::ports::{EventSink, NullEventSink, TokenLedgerApi};

    // Adapters
    pub use crate::adapters::{BroadcastEventSink, InMemoryEventLog};

    // Service and config
    pub use crate::config::{ConfigError, DeployError, LedgerConfig};
    pub use crate::service::{LedgerService, ServiceStats};

    // Units
    pub use crate::units::{format_units, parse_units, to_base_units, UnitsError};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
