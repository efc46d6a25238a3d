//! Treatment assignments
//!
//! An assignment links one patient to one medication for a fixed number of
//! days starting on a calendar date. The patient and medication references are
//! fixed at creation; only the [`TreatmentTiming`] may change afterwards.

use crate::domain::errors::{MedtrackError, ValidationErrors};
use crate::domain::ids::{AssignmentId, MedicationId, PatientId};
use crate::domain::medication::Medication;
use crate::domain::patient::Patient;
use crate::domain::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest accepted treatment, in days
pub const MAX_NUMBER_OF_DAYS: i64 = i32::MAX as i64;

/// Start date and duration of a treatment
///
/// Invariant: `1 <= number_of_days <= MAX_NUMBER_OF_DAYS`. The constructor is
/// the only way in, so a `TreatmentTiming` value is always valid.
///
/// # Examples
///
/// ```
/// use medtrack::domain::assignment::TreatmentTiming;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let timing = TreatmentTiming::new(start, 7).unwrap();
/// assert_eq!(timing.number_of_days(), 7);
/// assert!(TreatmentTiming::new(start, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TimingFields")]
pub struct TreatmentTiming {
    start_date: NaiveDate,
    number_of_days: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimingFields {
    start_date: NaiveDate,
    number_of_days: i64,
}

impl TryFrom<TimingFields> for TreatmentTiming {
    type Error = String;

    fn try_from(fields: TimingFields) -> std::result::Result<Self, Self::Error> {
        TreatmentTiming::new(fields.start_date, fields.number_of_days).map_err(|e| e.to_string())
    }
}

impl TreatmentTiming {
    /// Creates a timing, rejecting durations below one day
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming `numberOfDays` when the duration is
    /// zero, negative or above [`MAX_NUMBER_OF_DAYS`].
    pub fn new(start_date: NaiveDate, number_of_days: i64) -> Result<Self> {
        if number_of_days < 1 {
            return Err(MedtrackError::Validation(ValidationErrors::single(
                "numberOfDays",
                "Number Of Days must be at least 1",
            )));
        }
        if number_of_days > MAX_NUMBER_OF_DAYS {
            return Err(MedtrackError::invalid_field(
                "numberOfDays",
                too_many_days_message(),
            ));
        }
        let number_of_days = u32::try_from(number_of_days).map_err(|_| {
            MedtrackError::invalid_field("numberOfDays", too_many_days_message())
        })?;

        Ok(Self {
            start_date,
            number_of_days,
        })
    }

    /// First calendar day of the treatment
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Prescribed duration in days
    pub fn number_of_days(&self) -> u32 {
        self.number_of_days
    }
}

pub(crate) fn too_many_days_message() -> String {
    format!("Number Of Days must not be greater than {MAX_NUMBER_OF_DAYS}")
}

/// Input for creating an assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub patient_id: PatientId,
    pub medication_id: MedicationId,
    pub timing: TreatmentTiming,
}

/// A stored assignment holding bare references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub patient_id: PatientId,
    pub medication_id: MedicationId,
    #[serde(flatten)]
    pub timing: TreatmentTiming,
}

impl Assignment {
    /// Attaches the resolved patient and medication records
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied records are not the ones this
    /// assignment references.
    pub fn with_relations(self, patient: Patient, medication: Medication) -> Result<AssignmentDetails> {
        if patient.id != self.patient_id || medication.id != self.medication_id {
            return Err(MedtrackError::Other(format!(
                "relations for assignment {} do not match its references",
                self.id
            )));
        }

        Ok(AssignmentDetails {
            id: self.id,
            timing: self.timing,
            patient,
            medication,
        })
    }
}

/// An assignment with its patient and medication resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetails {
    pub id: AssignmentId,
    #[serde(flatten)]
    pub timing: TreatmentTiming,
    pub patient: Patient,
    pub medication: Medication,
}
