//! Chemical inventory domain.
//!
//! This crate contains the bookkeeping rules for chemicals, stock batches and
//! usage, implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). "Today" is always passed in by the caller.

pub mod batch;
pub mod chemical;
pub mod command;
pub mod expiry;
pub mod ledger;
pub mod query;
pub mod store;
pub mod unit;
pub mod usage;

pub use batch::{low_stock_ratio, Batch};
pub use chemical::Chemical;
pub use command::{parse_quantity, IntakeForm, RecordIntake, RecordUsage, UsageForm};
pub use expiry::{classify, days_left, ExpiryInfo, ExpiryStatus};
pub use ledger::BatchLedger;
pub use query::{
    available_batches, batch_detail, dashboard, expired, expiring_soon, filter_batches,
    usage_history, BatchDetail, BatchFilter, BatchView, DashboardStats, StatusCounts,
    RECENT_USAGE_LIMIT,
};
pub use store::InventoryStore;
pub use unit::QuantityUnit;
pub use usage::{UsageEntry, UsageLog};
