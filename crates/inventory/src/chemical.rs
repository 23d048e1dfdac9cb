use serde::{Deserialize, Serialize};

use labstock_core::{ChemicalId, Entity};

/// A chemical as registered by an intake entry.
///
/// Records are never merged by name: every intake registers a fresh chemical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chemical {
    pub chemical_id: ChemicalId,
    pub chemical_name: String,
    pub category: String,
    #[serde(default)]
    pub remarks: String,
}

impl Entity for Chemical {
    type Id = ChemicalId;

    fn id(&self) -> ChemicalId {
        self.chemical_id
    }
}
