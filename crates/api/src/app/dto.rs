use serde::Deserialize;

use labstock_core::DomainResult;
use labstock_inventory::{Batch, BatchFilter, BatchView};

// -------------------------
// Request DTOs
// -------------------------

/// `GET /batches/` query string. `"all"` or absent disables a criterion.
#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub unit: Option<String>,
}

impl BatchQuery {
    pub fn to_filter(&self) -> DomainResult<BatchFilter> {
        BatchFilter::from_params(
            self.search.as_deref(),
            self.status.as_deref(),
            self.unit.as_deref(),
        )
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn batch_views<'a>(
    batches: impl IntoIterator<Item = &'a Batch>,
    today: chrono::NaiveDate,
) -> serde_json::Value {
    let rows: Vec<BatchView<'a>> = batches.into_iter().map(|b| BatchView::new(b, today)).collect();
    serde_json::json!(rows)
}
