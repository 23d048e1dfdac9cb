//! Read-side views derived from batches and usage entries.
//!
//! Everything here is a pure function over slices, so the same views can be
//! computed inside the service or on lists fetched by a client.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use labstock_core::{find_by_id, BatchId, DomainError, DomainResult};

use crate::batch::Batch;
use crate::expiry::{ExpiryInfo, ExpiryStatus};
use crate::unit::QuantityUnit;
use crate::usage::UsageEntry;

/// How many usage entries the dashboard shows.
pub const RECENT_USAGE_LIMIT: usize = 5;

/// Combined batch filter. All criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchFilter {
    /// Case-insensitive substring over chemical name, batch number, category.
    pub search: String,
    /// `None` means "all".
    pub status: Option<ExpiryStatus>,
    /// `None` means "all".
    pub unit: Option<QuantityUnit>,
}

impl BatchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_status(mut self, status: ExpiryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_unit(mut self, unit: QuantityUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Build from query-string values; `"all"` and blanks disable a criterion.
    pub fn from_params(
        search: Option<&str>,
        status: Option<&str>,
        unit: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            search: search.unwrap_or_default().to_string(),
            status: parse_selection(status)?,
            unit: parse_selection(unit)?,
        })
    }

    /// Query-string pairs for the active criteria.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.trim().is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(unit) = self.unit {
            pairs.push(("unit", unit.symbol().to_string()));
        }
        pairs
    }

    pub fn matches(&self, batch: &Batch, today: NaiveDate) -> bool {
        matches_search(batch, &self.search)
            && self.status.is_none_or(|s| batch.expiry(today).status == s)
            && self.unit.is_none_or(|u| batch.quantity_unit() == u)
    }
}

fn parse_selection<T>(raw: Option<&str>) -> DomainResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

fn matches_search(batch: &Batch, term: &str) -> bool {
    // Whitespace-only means no search; otherwise the term is matched as typed.
    if term.trim().is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [batch.chemical_name(), batch.batch_number(), batch.category()]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

fn sort_by_expiry(batches: &mut [&Batch]) {
    batches.sort_by_key(|b| b.expiry_date());
}

/// Batches matching `filter`, soonest expiry first (ties keep intake order).
pub fn filter_batches<'a>(batches: &'a [Batch], filter: &BatchFilter, today: NaiveDate) -> Vec<&'a Batch> {
    let mut out: Vec<&Batch> = batches.iter().filter(|b| filter.matches(b, today)).collect();
    sort_by_expiry(&mut out);
    out
}

/// Batches that still hold stock, soonest expiry first.
pub fn available_batches(batches: &[Batch]) -> Vec<&Batch> {
    let mut out: Vec<&Batch> = batches.iter().filter(|b| b.has_stock()).collect();
    sort_by_expiry(&mut out);
    out
}

/// Filtered batches inside the warning window (red, orange, yellow).
pub fn expiring_soon<'a>(batches: &'a [Batch], filter: &BatchFilter, today: NaiveDate) -> Vec<&'a Batch> {
    filter_batches(batches, filter, today)
        .into_iter()
        .filter(|b| b.expiry(today).status.is_expiring_soon())
        .collect()
}

/// Filtered batches already past expiry.
pub fn expired<'a>(batches: &'a [Batch], filter: &BatchFilter, today: NaiveDate) -> Vec<&'a Batch> {
    filter_batches(batches, filter, today)
        .into_iter()
        .filter(|b| b.expiry(today).status == ExpiryStatus::Expired)
        .collect()
}

/// Every usage entry, newest first.
pub fn usage_history(entries: &[UsageEntry]) -> Vec<&UsageEntry> {
    entries.iter().rev().collect()
}

/// A batch annotated with its expiry classification and stock level.
#[derive(Debug, Clone, Serialize)]
pub struct BatchView<'a> {
    #[serde(flatten)]
    pub batch: &'a Batch,
    pub expiry: ExpiryInfo,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock_percent: Decimal,
}

impl<'a> BatchView<'a> {
    pub fn new(batch: &'a Batch, today: NaiveDate) -> Self {
        Self {
            batch,
            expiry: batch.expiry(today),
            stock_percent: batch.stock_percent().round_dp(1),
        }
    }
}

/// Batch count per expiry bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub green: usize,
    pub yellow: usize,
    pub orange: usize,
    pub red: usize,
    pub expired: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ExpiryStatus) -> usize {
        match status {
            ExpiryStatus::Green => self.green,
            ExpiryStatus::Yellow => self.yellow,
            ExpiryStatus::Orange => self.orange,
            ExpiryStatus::Red => self.red,
            ExpiryStatus::Expired => self.expired,
        }
    }

    fn increment(&mut self, status: ExpiryStatus) {
        let slot = match status {
            ExpiryStatus::Green => &mut self.green,
            ExpiryStatus::Yellow => &mut self.yellow,
            ExpiryStatus::Orange => &mut self.orange,
            ExpiryStatus::Red => &mut self.red,
            ExpiryStatus::Expired => &mut self.expired,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.green + self.yellow + self.orange + self.red + self.expired
    }
}

/// Dashboard aggregate (filters do not apply).
///
/// `low_stock` holds every low batch; only `recent_usage` is capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub status_counts: StatusCounts,
    pub total_batches: usize,
    pub low_stock: Vec<Batch>,
    pub recent_usage: Vec<UsageEntry>,
}

pub fn dashboard(batches: &[Batch], entries: &[UsageEntry], today: NaiveDate) -> DashboardStats {
    let mut status_counts = StatusCounts::default();
    for batch in batches {
        status_counts.increment(batch.expiry(today).status);
    }

    DashboardStats {
        status_counts,
        total_batches: batches.len(),
        low_stock: batches.iter().filter(|b| b.is_low_stock()).cloned().collect(),
        recent_usage: entries.iter().rev().take(RECENT_USAGE_LIMIT).cloned().collect(),
    }
}

/// One batch with its classification and full usage history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDetail {
    pub batch: Batch,
    pub expiry: ExpiryInfo,
    /// Oldest first.
    pub usage: Vec<UsageEntry>,
}

pub fn batch_detail(
    batches: &[Batch],
    entries: &[UsageEntry],
    batch_id: BatchId,
    today: NaiveDate,
) -> DomainResult<BatchDetail> {
    let batch = find_by_id(batches, batch_id)
        .ok_or_else(|| DomainError::not_found(format!("batch {batch_id}")))?;

    Ok(BatchDetail {
        batch: batch.clone(),
        expiry: batch.expiry(today),
        usage: entries.iter().filter(|e| e.batch_id == batch_id).cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{RecordIntake, RecordUsage};
    use crate::store::InventoryStore;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn today() -> NaiveDate {
        date("2024-01-01")
    }

    fn intake(name: &str, category: &str, number: &str, expiry: &str, unit: QuantityUnit) -> RecordIntake {
        RecordIntake {
            chemical_name: name.to_string(),
            category: category.to_string(),
            batch_number: number.to_string(),
            received_date: Some(today()),
            expiry_date: date(expiry),
            quantity_value: Decimal::from(100),
            quantity_unit: unit,
            remarks: String::new(),
        }
    }

    fn draw(store: &mut InventoryStore, batch_id: BatchId, qty: i64) {
        store
            .record_usage(
                RecordUsage {
                    batch_id,
                    quantity_used: Decimal::from(qty),
                    usage_date: None,
                    purpose: None,
                    remarks: None,
                },
                today(),
            )
            .unwrap();
    }

    /// expired, red, orange, yellow, green in scrambled intake order.
    fn seeded() -> InventoryStore {
        let mut store = InventoryStore::new();
        let rows = [
            ("Ethanol", "Solvent", "ETH-9", "2024-03-01", QuantityUnit::Liter),
            ("Sodium Hydroxide", "Base", "BTH-001", "2023-12-25", QuantityUnit::Gram),
            ("Hydrochloric Acid", "Acid", "HCL-7", "2024-01-05", QuantityUnit::Milliliter),
            ("Acetone", "Solvent", "ACE-2", "2024-01-20", QuantityUnit::Milliliter),
            ("Potassium Nitrate", "Salt", "KNO-3", "2024-01-10", QuantityUnit::Kilogram),
        ];
        for (name, category, number, expiry, unit) in rows {
            store.record_intake(intake(name, category, number, expiry, unit), today()).unwrap();
        }
        store
    }

    fn numbers(batches: &[&Batch]) -> Vec<String> {
        batches.iter().map(|b| b.batch_number().to_string()).collect()
    }

    #[test]
    fn empty_filter_returns_everything_sorted_by_expiry() {
        let store = seeded();
        let out = filter_batches(store.batches(), &BatchFilter::new(), today());
        assert_eq!(numbers(&out), ["BTH-001", "HCL-7", "KNO-3", "ACE-2", "ETH-9"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let store = seeded();
        let by_name = filter_batches(store.batches(), &BatchFilter::new().with_search("sodium"), today());
        assert_eq!(numbers(&by_name), ["BTH-001"]);

        let by_number = filter_batches(store.batches(), &BatchFilter::new().with_search("hcl"), today());
        assert_eq!(numbers(&by_number), ["HCL-7"]);

        let by_category = filter_batches(store.batches(), &BatchFilter::new().with_search("SOLVENT"), today());
        assert_eq!(numbers(&by_category), ["ACE-2", "ETH-9"]);

        let blank = filter_batches(store.batches(), &BatchFilter::new().with_search("   "), today());
        assert_eq!(blank.len(), 5);
    }

    #[test]
    fn search_term_is_not_trimmed() {
        let store = seeded();
        let padded = filter_batches(store.batches(), &BatchFilter::new().with_search("BTH-001 "), today());
        assert!(padded.is_empty());

        let spaced = filter_batches(store.batches(), &BatchFilter::new().with_search("hydroxide"), today());
        assert_eq!(numbers(&spaced), ["BTH-001"]);
        let inner = filter_batches(store.batches(), &BatchFilter::new().with_search("m h"), today());
        assert_eq!(numbers(&inner), ["BTH-001"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let store = seeded();
        let filter = BatchFilter::new()
            .with_search("a")
            .with_unit(QuantityUnit::Milliliter)
            .with_status(ExpiryStatus::Orange);
        let out = filter_batches(store.batches(), &filter, today());
        assert!(out.is_empty(), "no orange ml batch");

        let filter = BatchFilter::new()
            .with_unit(QuantityUnit::Milliliter)
            .with_status(ExpiryStatus::Yellow);
        let out = filter_batches(store.batches(), &filter, today());
        assert_eq!(numbers(&out), ["ACE-2"]);
    }

    #[test]
    fn params_parse_all_and_blank_as_no_filter() {
        let f = BatchFilter::from_params(Some("acid"), Some("all"), Some("")).unwrap();
        assert_eq!(f, BatchFilter::new().with_search("acid"));

        let f = BatchFilter::from_params(None, Some("red"), Some("kg")).unwrap();
        assert_eq!(f.status, Some(ExpiryStatus::Red));
        assert_eq!(f.unit, Some(QuantityUnit::Kilogram));

        assert!(BatchFilter::from_params(None, Some("blue"), None).is_err());
        assert!(BatchFilter::from_params(None, None, Some("oz")).is_err());
    }

    #[test]
    fn query_pairs_only_carry_active_criteria() {
        let f = BatchFilter::new().with_status(ExpiryStatus::Expired).with_unit(QuantityUnit::Liter);
        assert_eq!(
            f.to_query_pairs(),
            vec![("status", "expired".to_string()), ("unit", "L".to_string())]
        );
        assert!(BatchFilter::new().to_query_pairs().is_empty());
    }

    #[test]
    fn tab_views_split_by_status() {
        let store = seeded();
        let soon = expiring_soon(store.batches(), &BatchFilter::new(), today());
        assert_eq!(numbers(&soon), ["HCL-7", "KNO-3", "ACE-2"]);

        let gone = expired(store.batches(), &BatchFilter::new(), today());
        assert_eq!(numbers(&gone), ["BTH-001"]);
    }

    #[test]
    fn dashboard_counts_every_bucket_and_lists_low_stock() {
        let mut store = seeded();
        let ids: Vec<BatchId> = store.batches().iter().map(|b| b.batch_id()).collect();
        draw(&mut store, ids[0], 75); // low
        draw(&mut store, ids[1], 100); // depleted, not low
        draw(&mut store, ids[2], 70); // exactly 30%, not low

        let stats = dashboard(store.batches(), store.usage_log().entries(), today());
        assert_eq!(stats.total_batches, 5);
        assert_eq!(stats.status_counts.total(), 5);
        for status in ExpiryStatus::ALL {
            assert_eq!(stats.status_counts.get(status), 1, "{status}");
        }
        let low: Vec<BatchId> = stats.low_stock.iter().map(|b| b.batch_id()).collect();
        assert_eq!(low, vec![ids[0]]);
    }

    #[test]
    fn dashboard_low_stock_lists_every_match() {
        let mut store = InventoryStore::new();
        for n in 0..7 {
            let cmd = intake("Acetone", "Solvent", &format!("ACE-{n}"), "2024-06-01", QuantityUnit::Milliliter);
            let id = store.record_intake(cmd, today()).unwrap().batch_id();
            draw(&mut store, id, 80);
        }

        let stats = dashboard(store.batches(), store.usage_log().entries(), today());
        assert_eq!(stats.low_stock.len(), 7);
        assert_eq!(stats.recent_usage.len(), RECENT_USAGE_LIMIT);
    }

    #[test]
    fn dashboard_recent_usage_is_last_five_newest_first() {
        let mut store = seeded();
        let id = store.batches()[4].batch_id();
        for qty in 1..=7 {
            draw(&mut store, id, qty);
        }
        let stats = store.dashboard(today());
        let used: Vec<Decimal> = stats.recent_usage.iter().map(|e| e.quantity_used).collect();
        let expected: Vec<Decimal> = (3..=7).rev().map(Decimal::from).collect();
        assert_eq!(used, expected);

        let history = usage_history(store.usage_log().entries());
        assert_eq!(history.len(), 7);
        assert_eq!(history[0].quantity_used, Decimal::from(7));
    }

    #[test]
    fn batch_detail_collects_only_that_batch_in_order() {
        let mut store = seeded();
        let a = store.batches()[0].batch_id();
        let b = store.batches()[1].batch_id();
        draw(&mut store, a, 5);
        draw(&mut store, b, 1);
        draw(&mut store, a, 6);

        let detail = store.batch_detail(a, today()).unwrap();
        assert_eq!(detail.batch.batch_id(), a);
        assert_eq!(detail.expiry.status, ExpiryStatus::Green);
        let used: Vec<Decimal> = detail.usage.iter().map(|e| e.quantity_used).collect();
        assert_eq!(used, vec![Decimal::from(5), Decimal::from(6)]);

        assert!(matches!(
            store.batch_detail(BatchId::new(404), today()),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn batch_view_flattens_batch_fields() {
        let mut store = seeded();
        let id = store.batches()[0].batch_id();
        draw(&mut store, id, 25);
        let batch = store.batch(id).unwrap();

        let json = serde_json::to_value(BatchView::new(batch, today())).unwrap();
        assert_eq!(json["batch_number"], "ETH-9");
        assert_eq!(json["expiry"]["status"], "green");
        assert_eq!(json["expiry"]["days_left"], 60);
        assert_eq!(json["stock_percent"], 75.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            .. ProptestConfig::default()
        })]

        #[test]
        fn search_is_idempotent(term in "[a-zA-Z0-9 -]{0,6}") {
            let store = seeded();
            let filter = BatchFilter::new().with_search(term);
            let once: Vec<Batch> = filter_batches(store.batches(), &filter, today())
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<Batch> = filter_batches(&once, &filter, today()).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }
    }
}
