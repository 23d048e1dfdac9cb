use core::str::FromStr;

use serde::{Deserialize, Serialize};

use labstock_core::DomainError;

/// Unit a batch quantity is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuantityUnit {
    #[default]
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "pcs")]
    Pieces,
}

impl QuantityUnit {
    pub const ALL: [QuantityUnit; 5] = [
        QuantityUnit::Milliliter,
        QuantityUnit::Liter,
        QuantityUnit::Gram,
        QuantityUnit::Kilogram,
        QuantityUnit::Pieces,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            QuantityUnit::Milliliter => "ml",
            QuantityUnit::Liter => "L",
            QuantityUnit::Gram => "g",
            QuantityUnit::Kilogram => "kg",
            QuantityUnit::Pieces => "pcs",
        }
    }
}

impl core::fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for QuantityUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        QuantityUnit::ALL
            .into_iter()
            .find(|u| u.symbol() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown quantity unit '{s}' (expected one of: ml, L, g, kg, pcs)"
                ))
            })
    }
}
