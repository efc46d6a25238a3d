//! Assignment service - the single entry point for assignment operations
//!
//! This module coordinates validation, storage and the remaining-days
//! calculator. Remaining days are always derived from the stored timing fields
//! at read time; no status is persisted.

use crate::adapters::database::traits::AssignmentStore;
use crate::core::clock::Clock;
use crate::core::report::{build_rows, RemainingDaysRow};
use crate::core::validator::AssignmentValidator;
use crate::domain::assignment::{AssignmentDetails, NewAssignment, TreatmentTiming};
use crate::domain::errors::MedtrackError;
use crate::domain::ids::AssignmentId;
use crate::domain::Result;
use crate::{log_assignment_created, log_report_generated};
use chrono::NaiveDate;
use std::sync::Arc;

/// Assignment service
pub struct AssignmentService {
    assignments: Arc<dyn AssignmentStore + Send + Sync>,
    validator: AssignmentValidator,
    clock: Arc<dyn Clock>,
}

impl AssignmentService {
    /// Create a new assignment service
    pub fn new(
        assignments: Arc<dyn AssignmentStore + Send + Sync>,
        validator: AssignmentValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            assignments,
            validator,
            clock,
        }
    }

    /// Create an assignment after confirming both references exist
    ///
    /// The input's timing has already passed its invariants by construction,
    /// so shape problems are rejected before any store access.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceNotFound` if the patient (checked first) or the
    /// medication does not exist. Nothing is persisted in that case.
    pub async fn create(&self, new_assignment: NewAssignment) -> Result<AssignmentDetails> {
        let refs = self
            .validator
            .validate_references(new_assignment.patient_id, new_assignment.medication_id)
            .await?;

        let id = self.assignments.insert(&new_assignment).await?;

        log_assignment_created!(
            id,
            new_assignment.patient_id,
            new_assignment.medication_id,
            new_assignment.timing.number_of_days()
        );

        Ok(AssignmentDetails {
            id,
            timing: new_assignment.timing,
            patient: refs.patient,
            medication: refs.medication,
        })
    }

    /// Fetch one assignment with its relations
    ///
    /// # Errors
    ///
    /// Returns `AssignmentNotFound` if no such assignment exists.
    pub async fn get_by_id(&self, id: AssignmentId) -> Result<AssignmentDetails> {
        self.assignments
            .get_by_id(id)
            .await?
            .ok_or(MedtrackError::AssignmentNotFound(id.get()))
    }

    /// Fetch every assignment with its relations, in store order
    pub async fn list_all(&self) -> Result<Vec<AssignmentDetails>> {
        let assignments = self.assignments.list_all().await?;
        tracing::debug!(count = assignments.len(), "Listed assignments");
        Ok(assignments)
    }

    /// Replace the start date and duration of an existing assignment
    ///
    /// Only the timing is written; the patient and medication references of
    /// the stored record are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentNotFound` if the assignment does not exist, or
    /// disappears before the write lands.
    pub async fn update(&self, id: AssignmentId, timing: TreatmentTiming) -> Result<AssignmentDetails> {
        let existing = self.get_by_id(id).await?;

        if !self.assignments.update_timing_by_id(id, &timing).await? {
            return Err(MedtrackError::AssignmentNotFound(id.get()));
        }

        tracing::info!(
            assignment_id = %id,
            start_date = %timing.start_date(),
            number_of_days = timing.number_of_days(),
            "Assignment timing updated"
        );

        Ok(AssignmentDetails {
            timing,
            ..existing
        })
    }

    /// Delete an existing assignment
    ///
    /// The existence check completes before the delete is issued, and the
    /// delete itself reports whether a row went away, so a concurrent removal
    /// still surfaces as not found.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentNotFound` if the assignment does not exist.
    pub async fn delete(&self, id: AssignmentId) -> Result<()> {
        self.get_by_id(id).await?;

        if !self.assignments.delete_by_id(id).await? {
            return Err(MedtrackError::AssignmentNotFound(id.get()));
        }

        tracing::info!(assignment_id = %id, "Assignment deleted");
        Ok(())
    }

    /// Remaining days for every assignment
    ///
    /// Today is read once, so every row is computed against the same date.
    pub async fn compute_remaining_days_report(&self) -> Result<Vec<RemainingDaysRow>> {
        let today = self.clock.today();
        let assignments = self.assignments.list_all().await?;
        let rows = build_rows(today, &assignments);

        log_report_generated!(today, rows.len());
        Ok(rows)
    }

    /// Remaining days for the assignments of patients with this exact name and
    /// date of birth
    ///
    /// An empty result is not an error: the identity may match nobody.
    pub async fn compute_remaining_days_for_patient(
        &self,
        name: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Vec<RemainingDaysRow>> {
        let today = self.clock.today();
        let assignments = self
            .assignments
            .find_by_patient_attributes(name, date_of_birth)
            .await?;
        let rows = build_rows(today, &assignments);

        log_report_generated!(today, rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::traits::{MedicationStore, PatientStore};
    use crate::adapters::memory::MemoryStore;
    use crate::core::clock::FixedClock;
    use crate::domain::ids::{MedicationId, PatientId};
    use crate::domain::medication::NewMedication;
    use crate::domain::patient::NewPatient;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    async fn setup() -> (AssignmentService, Arc<MemoryStore>, PatientId, MedicationId) {
        let store = Arc::new(MemoryStore::new());
        let patient = store
            .insert_patient(&NewPatient {
                name: "Patient 1".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 3).unwrap(),
            })
            .await
            .unwrap();
        let medication = store
            .insert_medication(&NewMedication {
                name: "Ibuprofen".to_string(),
                dosage: "200mg".to_string(),
                frequency: "twice daily".to_string(),
            })
            .await
            .unwrap();

        let validator = AssignmentValidator::new(store.clone(), store.clone());
        let service = AssignmentService::new(store.clone(), validator, Arc::new(FixedClock(today())));
        (service, store, patient.id, medication.id)
    }

    #[tokio::test]
    async fn test_create_populates_relations() {
        let (service, _, patient_id, medication_id) = setup().await;

        let created = service
            .create(NewAssignment {
                patient_id,
                medication_id,
                timing: TreatmentTiming::new(today(), 7).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(created.patient.name, "Patient 1");
        assert_eq!(created.medication.name, "Ibuprofen");
        assert_eq!(service.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_keeps_references() {
        let (service, _, patient_id, medication_id) = setup().await;
        let created = service
            .create(NewAssignment {
                patient_id,
                medication_id,
                timing: TreatmentTiming::new(today(), 7).unwrap(),
            })
            .await
            .unwrap();

        let new_start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let updated = service
            .update(created.id, TreatmentTiming::new(new_start, 30).unwrap())
            .await
            .unwrap();

        assert_eq!(updated.timing.start_date(), new_start);
        assert_eq!(updated.patient.id, patient_id);
        assert_eq!(updated.medication.id, medication_id);
        assert_eq!(service.get_by_id(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (service, _, _, _) = setup().await;
        let err = service.delete(AssignmentId::new(77).unwrap()).await.unwrap_err();
        assert!(matches!(err, MedtrackError::AssignmentNotFound(77)));
    }

    #[tokio::test]
    async fn test_report_uses_fixed_today() {
        let (service, _, patient_id, medication_id) = setup().await;
        service
            .create(NewAssignment {
                patient_id,
                medication_id,
                timing: TreatmentTiming::new(today() - chrono::Duration::days(2), 5).unwrap(),
            })
            .await
            .unwrap();

        let rows = service.compute_remaining_days_report().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].remaining_days, 3);
    }
}
