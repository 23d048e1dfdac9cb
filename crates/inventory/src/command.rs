//! Entry commands (IN / OUT) and their validation.
//!
//! Typed commands double as the JSON request bodies of the entry endpoints.
//! The `*Form` types hold raw text input and parse into commands; that is the
//! validation step that runs before anything is submitted.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use labstock_core::{BatchId, DomainError, DomainResult};

use crate::unit::QuantityUnit;

/// Command: record a new batch of a chemical (IN entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordIntake {
    pub chemical_name: String,
    pub category: String,
    pub batch_number: String,
    /// Defaults to the recording day when absent or blank.
    #[serde(default, deserialize_with = "blank_date::deserialize")]
    pub received_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_value: Decimal,
    pub quantity_unit: QuantityUnit,
    #[serde(default)]
    pub remarks: String,
}

impl RecordIntake {
    pub fn validate(&self) -> DomainResult<()> {
        require("chemical_name", &self.chemical_name)?;
        require("category", &self.category)?;
        require("batch_number", &self.batch_number)?;
        if self.quantity_value <= Decimal::ZERO {
            return Err(DomainError::validation("quantity_value must be positive"));
        }
        Ok(())
    }
}

/// Command: record consumption from one batch (OUT entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUsage {
    pub batch_id: BatchId,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_used: Decimal,
    /// Defaults to the recording day when absent or blank.
    #[serde(default, deserialize_with = "blank_date::deserialize")]
    pub usage_date: Option<NaiveDate>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl RecordUsage {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity_used <= Decimal::ZERO {
            return Err(DomainError::validation("quantity_used must be positive"));
        }
        Ok(())
    }
}

/// Raw IN-entry form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    pub chemical_name: String,
    pub category: String,
    pub batch_number: String,
    pub received_date: String,
    pub expiry_date: String,
    pub quantity_value: String,
    pub quantity_unit: String,
    pub remarks: String,
}

impl IntakeForm {
    /// Parse into a validated [`RecordIntake`].
    pub fn parse(&self) -> DomainResult<RecordIntake> {
        require("chemical_name", &self.chemical_name)?;
        require("category", &self.category)?;
        require("batch_number", &self.batch_number)?;
        require("expiry_date", &self.expiry_date)?;
        require("quantity_value", &self.quantity_value)?;

        let unit = if self.quantity_unit.trim().is_empty() {
            QuantityUnit::default()
        } else {
            QuantityUnit::from_str(&self.quantity_unit)?
        };

        let cmd = RecordIntake {
            chemical_name: self.chemical_name.trim().to_string(),
            category: self.category.trim().to_string(),
            batch_number: self.batch_number.trim().to_string(),
            received_date: parse_optional_date("received_date", &self.received_date)?,
            expiry_date: parse_date("expiry_date", &self.expiry_date)?,
            quantity_value: parse_quantity(&self.quantity_value)?,
            quantity_unit: unit,
            remarks: self.remarks.trim().to_string(),
        };
        cmd.validate()?;
        Ok(cmd)
    }
}

/// Raw OUT-entry form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageForm {
    pub batch_id: String,
    pub quantity_used: String,
    pub usage_date: String,
    pub purpose: String,
    pub remarks: String,
}

impl UsageForm {
    /// Parse into a validated [`RecordUsage`].
    pub fn parse(&self) -> DomainResult<RecordUsage> {
        require("batch_id", &self.batch_id)?;
        require("quantity_used", &self.quantity_used)?;

        let cmd = RecordUsage {
            batch_id: BatchId::from_str(&self.batch_id)?,
            quantity_used: parse_quantity(&self.quantity_used)?,
            usage_date: parse_optional_date("usage_date", &self.usage_date)?,
            purpose: non_empty(&self.purpose),
            remarks: non_empty(&self.remarks),
        };
        cmd.validate()?;
        Ok(cmd)
    }
}

/// Parse a user-entered quantity: a positive decimal number.
pub fn parse_quantity(input: &str) -> DomainResult<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DomainError::validation("quantity is required"));
    }
    let value = Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| DomainError::validation(format!("quantity '{input}' is not a number")))?;
    if value <= Decimal::ZERO {
        return Err(DomainError::validation("quantity must be positive"));
    }
    Ok(value)
}

/// Trimmed text, or `None` when blank.
pub fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn parse_date(field: &str, input: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        DomainError::validation(format!("{field} must be a date (YYYY-MM-DD), got '{input}'"))
    })
}

fn parse_optional_date(field: &str, input: &str) -> DomainResult<Option<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_date(field, input).map(Some)
}

/// Optional `YYYY-MM-DD` body field where `null` and `""` both mean unset.
mod blank_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake_form() -> IntakeForm {
        IntakeForm {
            chemical_name: "Sodium Hydroxide".to_string(),
            category: "Base".to_string(),
            batch_number: "BTH-001".to_string(),
            received_date: "2024-01-01".to_string(),
            expiry_date: "2024-02-01".to_string(),
            quantity_value: "100".to_string(),
            quantity_unit: "ml".to_string(),
            remarks: String::new(),
        }
    }

    #[test]
    fn intake_form_parses_into_command() {
        let cmd = intake_form().parse().unwrap();
        assert_eq!(cmd.chemical_name, "Sodium Hydroxide");
        assert_eq!(cmd.quantity_value, Decimal::from(100));
        assert_eq!(cmd.quantity_unit, QuantityUnit::Milliliter);
        assert_eq!(cmd.received_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(cmd.expiry_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn intake_form_requires_fields() {
        for field in ["chemical_name", "category", "batch_number", "expiry_date", "quantity_value"] {
            let mut form = intake_form();
            match field {
                "chemical_name" => form.chemical_name = "  ".to_string(),
                "category" => form.category.clear(),
                "batch_number" => form.batch_number.clear(),
                "expiry_date" => form.expiry_date.clear(),
                _ => form.quantity_value.clear(),
            }
            let err = form.parse().unwrap_err();
            assert_eq!(err, DomainError::validation(format!("{field} is required")));
        }
    }

    #[test]
    fn intake_form_rejects_bad_values() {
        let mut form = intake_form();
        form.quantity_value = "ten".to_string();
        assert!(matches!(form.parse(), Err(DomainError::Validation(_))));

        let mut form = intake_form();
        form.quantity_unit = "gallon".to_string();
        assert!(matches!(form.parse(), Err(DomainError::Validation(_))));

        let mut form = intake_form();
        form.expiry_date = "01/02/2024".to_string();
        assert!(matches!(form.parse(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn blank_received_date_is_left_for_the_store() {
        let mut form = intake_form();
        form.received_date.clear();
        assert_eq!(form.parse().unwrap().received_date, None);
    }

    #[test]
    fn usage_form_normalizes_optional_text() {
        let form = UsageForm {
            batch_id: "3".to_string(),
            quantity_used: "12.5".to_string(),
            usage_date: String::new(),
            purpose: "  titration ".to_string(),
            remarks: "   ".to_string(),
        };
        let cmd = form.parse().unwrap();
        assert_eq!(cmd.batch_id, BatchId::new(3));
        assert_eq!(cmd.quantity_used, Decimal::new(125, 1));
        assert_eq!(cmd.usage_date, None);
        assert_eq!(cmd.purpose.as_deref(), Some("titration"));
        assert_eq!(cmd.remarks, None);
    }

    #[test]
    fn usage_form_rejects_bad_batch_id() {
        let form = UsageForm {
            batch_id: "abc".to_string(),
            quantity_used: "1".to_string(),
            ..UsageForm::default()
        };
        assert!(matches!(form.parse(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn parse_quantity_rules() {
        assert_eq!(parse_quantity(" 0.25 ").unwrap(), Decimal::new(25, 2));
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("1e").is_err());
    }

    #[test]
    fn parse_quantity_accepts_exponent_notation() {
        assert_eq!(parse_quantity("1e3").unwrap(), Decimal::from(1000));
        assert_eq!(parse_quantity("2.5E-1").unwrap(), Decimal::new(25, 2));
        assert!(parse_quantity("-1e2").is_err());
    }

    #[test]
    fn blank_wire_dates_mean_unset() {
        let body = serde_json::json!({
            "chemical_name": "Ethanol",
            "category": "Solvent",
            "batch_number": "ETH-1",
            "received_date": "",
            "expiry_date": "2024-06-01",
            "quantity_value": 5,
            "quantity_unit": "L"
        });
        let cmd: RecordIntake = serde_json::from_value(body).unwrap();
        assert_eq!(cmd.received_date, None);

        let usage: RecordUsage =
            serde_json::from_value(serde_json::json!({ "batch_id": 1, "quantity_used": 2, "usage_date": "" }))
                .unwrap();
        assert_eq!(usage.usage_date, None);

        let usage: RecordUsage =
            serde_json::from_value(serde_json::json!({ "batch_id": 1, "quantity_used": 2, "usage_date": null }))
                .unwrap();
        assert_eq!(usage.usage_date, None);

        let usage: RecordUsage = serde_json::from_value(
            serde_json::json!({ "batch_id": 1, "quantity_used": 2, "usage_date": "2024-03-05" }),
        )
        .unwrap();
        assert_eq!(usage.usage_date, NaiveDate::from_ymd_opt(2024, 3, 5));

        let bad = serde_json::json!({ "batch_id": 1, "quantity_used": 2, "usage_date": "05/03/2024" });
        assert!(serde_json::from_value::<RecordUsage>(bad).is_err());
    }

    #[test]
    fn intake_command_deserializes_from_wire_body() {
        let body = serde_json::json!({
            "chemical_name": "Sodium Hydroxide",
            "category": "Base",
            "batch_number": "BTH-001",
            "received_date": "2024-01-01",
            "expiry_date": "2024-02-01",
            "quantity_value": 100,
            "quantity_unit": "ml",
            "remarks": ""
        });
        let cmd: RecordIntake = serde_json::from_value(body).unwrap();
        assert_eq!(cmd.quantity_value, Decimal::from(100));
        cmd.validate().unwrap();
    }

    #[test]
    fn usage_command_rejects_zero_quantity() {
        let cmd = RecordUsage {
            batch_id: BatchId::new(1),
            quantity_used: Decimal::ZERO,
            usage_date: None,
            purpose: None,
            remarks: None,
        };
        assert!(matches!(cmd.validate(), Err(DomainError::Validation(_))));
    }
}
