//! # Ledger Service
//!
//! Thread-safe wrapper around [`LedgerEngine`] that forwards every emitted
//! event to an [`EventSink`] and keeps operation statistics.
//!
//! All calls, reads included, go through one mutex, so operations are
//! totally ordered. Events are published before the lock is released and
//! reach observers in the same order the operations were applied.

use crate::config::{DeployError, LedgerConfig};
use crate::domain::{
    check_all_invariants, Address, FeeSchedule, Genesis, InvariantViolation, LedgerEngine,
    LedgerError, Receipt, Role, U256,
};
use crate::ports::{EventSink, TokenLedgerApi};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Operations applied.
    pub operations_applied: u64,
    /// Operations rejected with an error.
    pub operations_rejected: u64,
    /// Events handed to the sink.
    pub events_published: u64,
    /// Sum of observers reached across all events.
    pub deliveries: u64,
}

/// The ledger service.
pub struct LedgerService<S: EventSink> {
    engine: Mutex<LedgerEngine>,
    sink: Arc<S>,
    stats: RwLock<ServiceStats>,
}

impl<S: EventSink> LedgerService<S> {
    /// Construct a ledger and publish its genesis mint to `sink`.
    pub fn new(genesis: Genesis, sink: Arc<S>) -> Result<Self, LedgerError> {
        let (engine, receipt) = LedgerEngine::new(genesis)?;
        let service = Self::from_engine(engine, sink);
        service.publish(&receipt);
        info!(
            name = %service.name(),
            total_supply = %service.total_supply(),
            "Ledger service started"
        );
        Ok(service)
    }

    /// Validate `config`, construct a ledger, and publish its genesis mint.
    pub fn deploy(config: &LedgerConfig, sink: Arc<S>) -> Result<Self, DeployError> {
        config.validate()?;
        Ok(Self::new(config.genesis(), sink)?)
    }

    /// Wrap an existing engine. Nothing is published.
    #[must_use]
    pub fn from_engine(engine: LedgerEngine, sink: Arc<S>) -> Self {
        Self {
            engine: Mutex::new(engine),
            sink,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    /// The event sink.
    #[must_use]
    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Run `f` against the engine under the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&LedgerEngine) -> R) -> R {
        f(&self.engine.lock())
    }

    /// Scan the whole state for invariant violations.
    #[must_use]
    pub fn audit(&self) -> Vec<InvariantViolation> {
        let violations = check_all_invariants(self.engine.lock().state());
        if !violations.is_empty() {
            warn!(violations = ?violations, "Ledger audit failed");
        }
        violations
    }

    fn execute<F>(&self, operation: &'static str, apply: F) -> Result<Receipt, LedgerError>
    where
        F: FnOnce(&mut LedgerEngine) -> Result<Receipt, LedgerError>,
    {
        let mut engine = self.engine.lock();
        match apply(&mut engine) {
            Ok(receipt) => {
                self.publish(&receipt);
                self.stats.write().operations_applied += 1;
                info!(operation, events = receipt.events.len(), "Operation applied");
                Ok(receipt)
            }
            Err(error) => {
                self.stats.write().operations_rejected += 1;
                warn!(operation, error = %error, "Operation rejected");
                Err(error)
            }
        }
    }

    fn publish(&self, receipt: &Receipt) {
        for event in &receipt.events {
            let reached = self.sink.publish(event);
            let mut stats = self.stats.write();
            stats.events_published += 1;
            stats.deliveries += reached as u64;
        }
    }
}

impl<S: EventSink> TokenLedgerApi for LedgerService<S> {
    fn name(&self) -> String {
        self.engine.lock().name().to_string()
    }

    fn symbol(&self) -> String {
        self.engine.lock().symbol().to_string()
    }

    fn decimals(&self) -> u8 {
        self.engine.lock().decimals()
    }

    fn total_supply(&self) -> U256 {
        self.engine.lock().total_supply()
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.engine.lock().balance_of(account)
    }

    fn allowance(&self, owner: &Address, delegate: &Address) -> U256 {
        self.engine.lock().allowance(owner, delegate)
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.engine.lock().has_role(role, account)
    }

    fn fee_schedule(&self) -> FeeSchedule {
        self.engine.lock().fee_schedule()
    }

    #[instrument(skip(self))]
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<Receipt, LedgerError> {
        self.execute("transfer", |engine| engine.transfer(caller, to, amount))
    }

    #[instrument(skip(self))]
    fn approve(
        &self,
        caller: Address,
        delegate: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        self.execute("approve", |engine| engine.approve(caller, delegate, amount))
    }

    #[instrument(skip(self))]
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Receipt, LedgerError> {
        self.execute("transfer_from", |engine| {
            engine.transfer_from(caller, from, to, amount)
        })
    }

    #[instrument(skip(self))]
    fn mint(&self, caller: Address, to: Address, amount: U256) -> Result<Receipt, LedgerError> {
        self.execute("mint", |engine| engine.mint(caller, to, amount))
    }

    #[instrument(skip(self))]
    fn burn(&self, caller: Address, from: Address, amount: U256) -> Result<Receipt, LedgerError> {
        self.execute("burn", |engine| engine.burn(caller, from, amount))
    }

    #[instrument(skip(self))]
    fn grant_role(
        &self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<Receipt, LedgerError> {
        self.execute("grant_role", |engine| engine.grant_role(caller, role, account))
    }
}
