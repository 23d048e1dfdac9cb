use labstock_core::{find_by_id, find_by_id_mut, BatchId};

use crate::batch::Batch;

/// Owner of all batch records, kept in intake order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchLedger {
    batches: Vec<Batch>,
}

impl BatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, batch: Batch) -> &Batch {
        self.batches.push(batch);
        &self.batches[self.batches.len() - 1]
    }

    pub fn get(&self, batch_id: BatchId) -> Option<&Batch> {
        find_by_id(&self.batches, batch_id)
    }

    pub(crate) fn get_mut(&mut self, batch_id: BatchId) -> Option<&mut Batch> {
        find_by_id_mut(&mut self.batches, batch_id)
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
