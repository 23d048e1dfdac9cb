use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use labstock_core::{BatchId, ChemicalId, DomainError, DomainResult, Entity};

use crate::chemical::Chemical;
use crate::expiry::{self, ExpiryInfo};
use crate::unit::QuantityUnit;

/// Fraction of the initial quantity below which a batch counts as low stock.
pub fn low_stock_ratio() -> Decimal {
    Decimal::new(3, 1)
}

/// A received lot of one chemical.
///
/// Invariant: `0 <= current_balance <= initial_quantity`. The balance only
/// moves through [`Batch::consume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BatchRecord")]
pub struct Batch {
    batch_id: BatchId,
    chemical_id: ChemicalId,
    chemical_name: String,
    category: String,
    batch_number: String,
    received_date: NaiveDate,
    expiry_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    initial_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    current_balance: Decimal,
    quantity_unit: QuantityUnit,
    #[serde(default)]
    remarks: String,
}

/// Wire shape of [`Batch`]; checked before it becomes one.
#[derive(Deserialize)]
struct BatchRecord {
    batch_id: BatchId,
    chemical_id: ChemicalId,
    chemical_name: String,
    category: String,
    batch_number: String,
    received_date: NaiveDate,
    expiry_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    initial_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    current_balance: Decimal,
    quantity_unit: QuantityUnit,
    #[serde(default)]
    remarks: String,
}

impl TryFrom<BatchRecord> for Batch {
    type Error = DomainError;

    fn try_from(r: BatchRecord) -> Result<Self, Self::Error> {
        if r.initial_quantity <= Decimal::ZERO {
            return Err(DomainError::invariant(format!(
                "batch {}: initial quantity must be positive",
                r.batch_id
            )));
        }
        if r.current_balance < Decimal::ZERO || r.current_balance > r.initial_quantity {
            return Err(DomainError::invariant(format!(
                "batch {}: balance {} outside 0..={}",
                r.batch_id, r.current_balance, r.initial_quantity
            )));
        }
        Ok(Self {
            batch_id: r.batch_id,
            chemical_id: r.chemical_id,
            chemical_name: r.chemical_name,
            category: r.category,
            batch_number: r.batch_number,
            received_date: r.received_date,
            expiry_date: r.expiry_date,
            initial_quantity: r.initial_quantity,
            current_balance: r.current_balance,
            quantity_unit: r.quantity_unit,
            remarks: r.remarks,
        })
    }
}

/// Attributes of a batch fixed at intake time.
#[derive(Debug, Clone)]
pub(crate) struct NewBatch {
    pub batch_number: String,
    pub received_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub quantity: Decimal,
    pub quantity_unit: QuantityUnit,
    pub remarks: String,
}

impl Batch {
    /// Receive a full batch for `chemical`, snapshotting its name and category.
    pub(crate) fn receive(batch_id: BatchId, chemical: &Chemical, new: NewBatch) -> DomainResult<Self> {
        if new.quantity <= Decimal::ZERO {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            batch_id,
            chemical_id: chemical.chemical_id,
            chemical_name: chemical.chemical_name.clone(),
            category: chemical.category.clone(),
            batch_number: new.batch_number,
            received_date: new.received_date,
            expiry_date: new.expiry_date,
            initial_quantity: new.quantity,
            current_balance: new.quantity,
            quantity_unit: new.quantity_unit,
            remarks: new.remarks,
        })
    }

    pub fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    pub fn chemical_id(&self) -> ChemicalId {
        self.chemical_id
    }

    pub fn chemical_name(&self) -> &str {
        &self.chemical_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn batch_number(&self) -> &str {
        &self.batch_number
    }

    pub fn received_date(&self) -> NaiveDate {
        self.received_date
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    pub fn initial_quantity(&self) -> Decimal {
        self.initial_quantity
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    pub fn quantity_unit(&self) -> QuantityUnit {
        self.quantity_unit
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn expiry(&self, today: NaiveDate) -> ExpiryInfo {
        expiry::classify(self.expiry_date, today)
    }

    /// Remaining stock as a percentage of the received quantity.
    pub fn stock_percent(&self) -> Decimal {
        self.current_balance
            .checked_div(self.initial_quantity)
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn has_stock(&self) -> bool {
        self.current_balance > Decimal::ZERO
    }

    pub fn is_depleted(&self) -> bool {
        self.current_balance.is_zero()
    }

    /// Some stock left, but under 30% of the initial quantity.
    pub fn is_low_stock(&self) -> bool {
        self.has_stock() && self.current_balance < self.initial_quantity * low_stock_ratio()
    }

    /// Take `quantity` out of the batch.
    ///
    /// Fails without touching the balance when `quantity` is not positive or
    /// exceeds what is left.
    pub fn consume(&mut self, quantity: Decimal) -> DomainResult<()> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::validation("quantity used must be positive"));
        }
        if quantity > self.current_balance {
            return Err(DomainError::insufficient_balance(quantity, self.current_balance));
        }

        let remaining = self.current_balance - quantity;
        if remaining < Decimal::ZERO || remaining > self.initial_quantity {
            return Err(DomainError::invariant("balance out of range"));
        }
        self.current_balance = remaining;
        Ok(())
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> BatchId {
        self.batch_id
    }
}
