use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use labstock_core::{BatchId, ChemicalId, Entity, UsageId};

use crate::unit::QuantityUnit;

/// One consumption event against a batch.
///
/// Chemical and batch attributes are copied at recording time; later changes
/// never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub usage_id: UsageId,
    pub chemical_id: ChemicalId,
    pub batch_id: BatchId,
    pub chemical_name: String,
    pub batch_number: String,
    pub usage_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_used: Decimal,
    pub quantity_unit: QuantityUnit,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Entity for UsageEntry {
    type Id = UsageId;

    fn id(&self) -> UsageId {
        self.usage_id
    }
}

/// Append-only usage log, kept in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageLog {
    entries: Vec<UsageEntry>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: UsageEntry) -> &UsageEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[UsageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded against `batch_id`, oldest first.
    pub fn for_batch(&self, batch_id: BatchId) -> impl Iterator<Item = &UsageEntry> {
        self.entries.iter().filter(move |e| e.batch_id == batch_id)
    }

    /// Up to `limit` most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &UsageEntry> {
        self.entries.iter().rev().take(limit)
    }
}
