//! # Domain Layer
//!
//! Pure ledger logic: value objects, the balance, allowance and role
//! registries, fee arithmetic, and the engine that composes them.

pub mod address;
pub mod allowances;
pub mod balances;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod fees;
pub mod invariants;
pub mod roles;
pub mod state;
pub mod value_objects;

pub use allowances::AllowanceRegistry;
pub use balances::{BalanceLedger, SupplyEffect};
pub use engine::LedgerEngine;
pub use entities::{Genesis, LedgerEvent, Receipt, TokenMetadata, DEFAULT_NAME, DEFAULT_SYMBOL};
pub use errors::{AddressParseError, DebitPurpose, FeeScheduleError, LedgerError, Party};
pub use fees::FeeSchedule;
pub use invariants::{check_all_invariants, InvariantViolation};
pub use roles::{Role, RoleRegistry};
pub use state::LedgerState;
pub use value_objects::{Address, TOKEN_DECIMALS, U256, UNLIMITED_ALLOWANCE};
