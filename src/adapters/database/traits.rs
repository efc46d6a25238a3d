//! Store abstraction traits
//!
//! This module defines the traits that storage backends must implement to
//! hold patients, medications and treatment assignments.
//!
//! Backends enforce referential integrity on writes: inserting an assignment
//! whose patient or medication no longer exists fails with
//! `ReferenceNotFound`, and deleting a patient or medication that is still
//! referenced fails with `ReferenceInUse`.

use crate::domain::assignment::{AssignmentDetails, NewAssignment, TreatmentTiming};
use crate::domain::ids::{AssignmentId, MedicationId, PatientId};
use crate::domain::medication::{Medication, NewMedication};
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Patient record storage
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Insert a patient and return it with its assigned id
    async fn insert_patient(&self, patient: &NewPatient) -> Result<Patient>;

    /// Look up a patient by id
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` when no such patient exists.
    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>>;

    /// List all patients ordered by id
    async fn list_patients(&self) -> Result<Vec<Patient>>;

    /// Overwrite a patient's attributes
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` when no such patient exists.
    async fn update_patient(&self, id: PatientId, patient: &NewPatient) -> Result<bool>;

    /// Remove a patient
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` when no such patient exists.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceInUse` if an assignment still references the patient.
    async fn delete_patient(&self, id: PatientId) -> Result<bool>;
}

/// Medication record storage
#[async_trait]
pub trait MedicationStore: Send + Sync {
    /// Insert a medication and return it with its assigned id
    async fn insert_medication(&self, medication: &NewMedication) -> Result<Medication>;

    /// Look up a medication by id
    async fn get_medication(&self, id: MedicationId) -> Result<Option<Medication>>;

    /// List all medications ordered by id
    async fn list_medications(&self) -> Result<Vec<Medication>>;

    /// Overwrite a medication's attributes; `Ok(false)` when absent
    async fn update_medication(&self, id: MedicationId, medication: &NewMedication)
        -> Result<bool>;

    /// Remove a medication; `Ok(false)` when absent
    ///
    /// # Errors
    ///
    /// Returns `ReferenceInUse` if an assignment still references the medication.
    async fn delete_medication(&self, id: MedicationId) -> Result<bool>;
}

/// Assignment storage
///
/// Every read resolves the patient and medication relations; no caller needs
/// the bare references.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Insert an assignment and return its store-assigned id
    ///
    /// # Errors
    ///
    /// Returns `ReferenceNotFound` if the patient or medication disappeared
    /// between validation and the write.
    async fn insert(&self, assignment: &NewAssignment) -> Result<AssignmentId>;

    /// Look up an assignment with its relations
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` when no such assignment exists.
    async fn get_by_id(&self, id: AssignmentId) -> Result<Option<AssignmentDetails>>;

    /// List every assignment with its relations, ordered by id
    async fn list_all(&self) -> Result<Vec<AssignmentDetails>>;

    /// Overwrite the timing fields of an assignment
    ///
    /// The patient and medication references are never written by this path.
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` when no such assignment exists.
    async fn update_timing_by_id(&self, id: AssignmentId, timing: &TreatmentTiming)
        -> Result<bool>;

    /// Remove an assignment; `Ok(false)` when absent
    async fn delete_by_id(&self, id: AssignmentId) -> Result<bool>;

    /// List assignments whose patient has exactly this name and date of birth
    ///
    /// Zero, one or several patients may match.
    async fn find_by_patient_attributes(
        &self,
        name: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Vec<AssignmentDetails>>;

    /// Get a short description of the backend for logs and status output
    fn backend_name(&self) -> &str;
}
