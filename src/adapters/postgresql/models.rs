//! PostgreSQL row models
//!
//! Each model maps one result row shape onto domain types. Column names match
//! the select lists in the adapter.

use crate::domain::assignment::{AssignmentDetails, TreatmentTiming};
use crate::domain::errors::StoreError;
use crate::domain::ids::AssignmentId;
use crate::domain::medication::Medication;
use crate::domain::patient::Patient;
use crate::domain::Result;
use chrono::NaiveDate;
use tokio_postgres::Row;

fn column<'a, T: tokio_postgres::types::FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| StoreError::InvalidData(format!("column {name}: {e}")).into())
}

fn id<T: TryFrom<i64, Error = String>>(raw: i64) -> Result<T> {
    T::try_from(raw).map_err(|e| StoreError::InvalidData(e).into())
}

/// Row of the `patients` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl PatientRow {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
            date_of_birth: column(row, "date_of_birth")?,
        })
    }

    pub fn into_domain(self) -> Result<Patient> {
        Ok(Patient {
            id: id(self.id)?,
            name: self.name,
            date_of_birth: self.date_of_birth,
        })
    }
}

/// Row of the `medications` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationRow {
    pub id: i64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

impl MedicationRow {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
            dosage: column(row, "dosage")?,
            frequency: column(row, "frequency")?,
        })
    }

    pub fn into_domain(self) -> Result<Medication> {
        Ok(Medication {
            id: id(self.id)?,
            name: self.name,
            dosage: self.dosage,
            frequency: self.frequency,
        })
    }
}

/// An assignment joined with its patient and medication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDetailsRow {
    pub id: i64,
    pub start_date: NaiveDate,
    pub number_of_days: i32,
    pub patient: PatientRow,
    pub medication: MedicationRow,
}

impl AssignmentDetailsRow {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            start_date: column(row, "start_date")?,
            number_of_days: column(row, "number_of_days")?,
            patient: PatientRow {
                id: column(row, "patient_id")?,
                name: column(row, "patient_name")?,
                date_of_birth: column(row, "patient_date_of_birth")?,
            },
            medication: MedicationRow {
                id: column(row, "medication_id")?,
                name: column(row, "medication_name")?,
                dosage: column(row, "medication_dosage")?,
                frequency: column(row, "medication_frequency")?,
            },
        })
    }

    pub fn into_domain(self) -> Result<AssignmentDetails> {
        let assignment_id: AssignmentId = id(self.id)?;
        let timing = TreatmentTiming::new(self.start_date, i64::from(self.number_of_days))
            .map_err(|e| {
                StoreError::InvalidData(format!("assignment {assignment_id}: {e}"))
            })?;

        Ok(AssignmentDetails {
            id: assignment_id,
            timing,
            patient: self.patient.into_domain()?,
            medication: self.medication.into_domain()?,
        })
    }
}

/// Day count as the `INTEGER` column holds it
///
/// `TreatmentTiming` never exceeds `i32::MAX`, so the conversion cannot fail.
pub fn number_of_days_column(timing: &TreatmentTiming) -> i32 {
    i32::try_from(timing.number_of_days()).unwrap_or(i32::MAX)
}
