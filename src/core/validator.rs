//! Assignment reference validation
//!
//! Confirms that the patient and medication an assignment points at exist.
//! The patient is looked up first; a missing patient short-circuits before the
//! medication lookup runs.

use crate::adapters::database::traits::{MedicationStore, PatientStore};
use crate::domain::errors::{EntityKind, MedtrackError};
use crate::domain::ids::{MedicationId, PatientId};
use crate::domain::medication::Medication;
use crate::domain::patient::Patient;
use crate::domain::Result;
use std::sync::Arc;

/// The records an assignment will reference
#[derive(Debug, Clone)]
pub struct ResolvedReferences {
    pub patient: Patient,
    pub medication: Medication,
}

/// Validator for assignment references
pub struct AssignmentValidator {
    patients: Arc<dyn PatientStore + Send + Sync>,
    medications: Arc<dyn MedicationStore + Send + Sync>,
}

impl AssignmentValidator {
    /// Create a validator over the patient and medication stores
    pub fn new(
        patients: Arc<dyn PatientStore + Send + Sync>,
        medications: Arc<dyn MedicationStore + Send + Sync>,
    ) -> Self {
        Self {
            patients,
            medications,
        }
    }

    /// Resolve both references or fail naming the first missing one
    ///
    /// # Errors
    ///
    /// Returns `ReferenceNotFound` for the patient if it is absent (the
    /// medication is then not looked up), otherwise for the medication if it
    /// is absent.
    pub async fn validate_references(
        &self,
        patient_id: PatientId,
        medication_id: MedicationId,
    ) -> Result<ResolvedReferences> {
        let patient = self.patients.get_patient(patient_id).await?.ok_or_else(|| {
            tracing::debug!(patient_id = %patient_id, "Referenced patient not found");
            MedtrackError::ReferenceNotFound {
                entity: EntityKind::Patient,
                id: patient_id.get(),
            }
        })?;

        let medication = self
            .medications
            .get_medication(medication_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(medication_id = %medication_id, "Referenced medication not found");
                MedtrackError::ReferenceNotFound {
                    entity: EntityKind::Medication,
                    id: medication_id.get(),
                }
            })?;

        Ok(ResolvedReferences {
            patient,
            medication,
        })
    }
}
