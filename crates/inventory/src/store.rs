//! Owned inventory state: chemical registry, batch ledger and usage log.

use chrono::NaiveDate;

use labstock_core::{BatchId, ChemicalId, DomainError, DomainResult, Sequence, UsageId};

use crate::batch::{Batch, NewBatch};
use crate::chemical::Chemical;
use crate::command::{non_empty, RecordIntake, RecordUsage};
use crate::ledger::BatchLedger;
use crate::query::{self, BatchDetail, BatchFilter, DashboardStats};
use crate::usage::{UsageEntry, UsageLog};

/// The inventory as one owned value.
///
/// Commands either apply completely or return an error with nothing changed.
/// The store holds no locks; callers sharing it between threads serialize
/// access themselves.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    chemicals: Vec<Chemical>,
    ledger: BatchLedger,
    log: UsageLog,
    chemical_seq: Sequence,
    batch_seq: Sequence,
    usage_seq: Sequence,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// IN entry: register a chemical and receive one full batch of it.
    ///
    /// `today` fills in a missing received date.
    pub fn record_intake(&mut self, cmd: RecordIntake, today: NaiveDate) -> DomainResult<&Batch> {
        cmd.validate()?;

        let chemical = Chemical {
            chemical_id: ChemicalId::new(self.chemical_seq.last() + 1),
            chemical_name: cmd.chemical_name.trim().to_string(),
            category: cmd.category.trim().to_string(),
            remarks: cmd.remarks.trim().to_string(),
        };
        let batch = Batch::receive(
            BatchId::new(self.batch_seq.last() + 1),
            &chemical,
            NewBatch {
                batch_number: cmd.batch_number.trim().to_string(),
                received_date: cmd.received_date.unwrap_or(today),
                expiry_date: cmd.expiry_date,
                quantity: cmd.quantity_value,
                quantity_unit: cmd.quantity_unit,
                remarks: cmd.remarks.trim().to_string(),
            },
        )?;

        // Nothing can fail past this point.
        self.chemical_seq.next_value();
        self.batch_seq.next_value();
        self.chemicals.push(chemical);
        Ok(self.ledger.insert(batch))
    }

    /// OUT entry: draw from a batch and log the usage.
    ///
    /// `today` fills in a missing usage date.
    pub fn record_usage(&mut self, cmd: RecordUsage, today: NaiveDate) -> DomainResult<&UsageEntry> {
        cmd.validate()?;

        let usage_id = UsageId::new(self.usage_seq.last() + 1);
        let batch = self
            .ledger
            .get_mut(cmd.batch_id)
            .ok_or_else(|| DomainError::not_found(format!("batch {}", cmd.batch_id)))?;

        batch.consume(cmd.quantity_used)?;

        let entry = UsageEntry {
            usage_id,
            chemical_id: batch.chemical_id(),
            batch_id: batch.batch_id(),
            chemical_name: batch.chemical_name().to_string(),
            batch_number: batch.batch_number().to_string(),
            usage_date: cmd.usage_date.unwrap_or(today),
            quantity_used: cmd.quantity_used,
            quantity_unit: batch.quantity_unit(),
            purpose: cmd.purpose.as_deref().and_then(non_empty),
            remarks: cmd.remarks.as_deref().and_then(non_empty),
        };
        self.usage_seq.next_value();
        Ok(self.log.append(entry))
    }

    /// Chemicals in registration order.
    pub fn chemicals(&self) -> &[Chemical] {
        &self.chemicals
    }

    /// Batches in intake order.
    pub fn batches(&self) -> &[Batch] {
        self.ledger.batches()
    }

    pub fn batch(&self, batch_id: BatchId) -> Option<&Batch> {
        self.ledger.get(batch_id)
    }

    pub fn ledger(&self) -> &BatchLedger {
        &self.ledger
    }

    pub fn usage_log(&self) -> &UsageLog {
        &self.log
    }

    /// Candidate batches for an OUT entry (first-expiring first).
    pub fn available_batches(&self) -> Vec<&Batch> {
        query::available_batches(self.batches())
    }

    pub fn search(&self, filter: &BatchFilter, today: NaiveDate) -> Vec<&Batch> {
        query::filter_batches(self.batches(), filter, today)
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        query::dashboard(self.batches(), self.log.entries(), today)
    }

    pub fn batch_detail(&self, batch_id: BatchId, today: NaiveDate) -> DomainResult<BatchDetail> {
        query::batch_detail(self.batches(), self.log.entries(), batch_id, today)
    }
}
