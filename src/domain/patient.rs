//! Patient records
//!
//! Patients are referenced by assignments but owned by the patient registry.

use crate::domain::ids::PatientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Store-assigned identifier, immutable once created
    pub id: PatientId,

    /// Display name
    pub name: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,
}

/// Patient attributes supplied on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    /// Display name, non-empty
    pub name: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,
}

impl NewPatient {
    /// Attaches a store-assigned id
    pub fn into_patient(self, id: PatientId) -> Patient {
        Patient {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth,
        }
    }
}

impl Patient {
    /// Returns true when both the name and date of birth match exactly
    pub fn matches_identity(&self, name: &str, date_of_birth: NaiveDate) -> bool {
        self.name == name && self.date_of_birth == date_of_birth
    }
}
