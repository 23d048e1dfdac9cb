//! Service wiring: one shared inventory store plus the clock that defines "today".

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};

use labstock_core::DomainResult;
use labstock_inventory::{Batch, InventoryStore, RecordIntake, RecordUsage, UsageEntry};

/// Source of the reference date for expiry classification and date defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Current UTC calendar date.
    System,
    /// Pinned date (tests, demos).
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Application services shared by all handlers.
///
/// Every command runs under a single lock acquisition, so concurrent OUT
/// entries against the same batch are serialized and cannot lose updates.
#[derive(Debug)]
pub struct AppServices {
    store: Mutex<InventoryStore>,
    clock: Clock,
}

impl AppServices {
    pub fn new(store: InventoryStore, clock: Clock) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Run a read against the store.
    pub fn read<T>(&self, f: impl FnOnce(&InventoryStore, NaiveDate) -> T) -> T {
        let today = self.today();
        f(&self.lock(), today)
    }

    pub fn record_intake(&self, cmd: RecordIntake) -> DomainResult<Batch> {
        let today = self.today();
        let mut store = self.lock();
        store.record_intake(cmd, today).cloned()
    }

    pub fn record_usage(&self, cmd: RecordUsage) -> DomainResult<UsageEntry> {
        let today = self.today();
        let mut store = self.lock();
        store.record_usage(cmd, today).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, InventoryStore> {
        // Commands never leave the store half-updated, so a poisoned lock is still usable.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new(InventoryStore::new(), Clock::System)
    }
}
