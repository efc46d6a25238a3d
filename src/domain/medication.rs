//! Medication records

use crate::domain::ids::MedicationId;
use serde::{Deserialize, Serialize};

/// A stored medication
///
/// `dosage` and `frequency` are free text (e.g. "200mg", "twice daily"),
/// not a structured schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Store-assigned identifier, immutable once created
    pub id: MedicationId,

    /// Medication name
    pub name: String,

    /// Dosage description
    pub dosage: String,

    /// Frequency description
    pub frequency: String,
}

/// Medication attributes supplied on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

impl NewMedication {
    /// Attaches a store-assigned id
    pub fn into_medication(self, id: MedicationId) -> Medication {
        Medication {
            id,
            name: self.name,
            dosage: self.dosage,
            frequency: self.frequency,
        }
    }
}
