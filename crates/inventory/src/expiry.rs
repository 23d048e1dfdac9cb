//! Expiry urgency classification.
//!
//! Both inputs are calendar dates, so the day difference is exact and never
//! depends on time-of-day or timezone offsets.

use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use labstock_core::DomainError;

/// Urgency bucket for a batch, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,
    Red,
    Orange,
    Yellow,
    Green,
}

impl ExpiryStatus {
    /// Every bucket, most urgent first.
    pub const ALL: [ExpiryStatus; 5] = [
        ExpiryStatus::Expired,
        ExpiryStatus::Red,
        ExpiryStatus::Orange,
        ExpiryStatus::Yellow,
        ExpiryStatus::Green,
    ];

    /// Classify a signed day count. First matching threshold wins.
    pub fn from_days_left(days_left: i64) -> Self {
        match days_left {
            d if d < 0 => ExpiryStatus::Expired,
            d if d < 7 => ExpiryStatus::Red,
            d if d < 15 => ExpiryStatus::Orange,
            d if d < 31 => ExpiryStatus::Yellow,
            _ => ExpiryStatus::Green,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::Red => "red",
            ExpiryStatus::Orange => "orange",
            ExpiryStatus::Yellow => "yellow",
            ExpiryStatus::Green => "green",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::Red => "Critical",
            ExpiryStatus::Orange => "Use Priority",
            ExpiryStatus::Yellow => "Approaching",
            ExpiryStatus::Green => "Safe",
        }
    }

    /// Not yet expired but inside the 31-day warning window.
    pub fn is_expiring_soon(&self) -> bool {
        matches!(
            self,
            ExpiryStatus::Red | ExpiryStatus::Orange | ExpiryStatus::Yellow
        )
    }
}

impl core::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expired" => Ok(ExpiryStatus::Expired),
            "red" => Ok(ExpiryStatus::Red),
            "orange" => Ok(ExpiryStatus::Orange),
            "yellow" => Ok(ExpiryStatus::Yellow),
            "green" => Ok(ExpiryStatus::Green),
            other => Err(DomainError::validation(format!(
                "unknown expiry status '{other}' (expected one of: expired, red, orange, yellow, green)"
            ))),
        }
    }
}

/// Classification result: bucket plus the signed day count it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryInfo {
    pub status: ExpiryStatus,
    pub days_left: i64,
}

impl ExpiryInfo {
    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    /// `"12 days"` before expiry, `"3 days ago"` after.
    pub fn days_display(&self) -> String {
        if self.days_left < 0 {
            format!("{} days ago", self.days_left.unsigned_abs())
        } else {
            format!("{} days", self.days_left)
        }
    }
}

/// Calendar days from `today` until `expiry` (negative once past).
pub fn days_left(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Classify an expiry date relative to `today`.
pub fn classify(expiry: NaiveDate, today: NaiveDate) -> ExpiryInfo {
    let days_left = days_left(expiry, today);
    ExpiryInfo {
        status: ExpiryStatus::from_days_left(days_left),
        days_left,
    }
}
