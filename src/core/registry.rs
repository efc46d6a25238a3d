//! Patient and medication registries
//!
//! Thin services over the record stores that turn absent records into
//! `NotFound` errors. Deleting a record still referenced by an assignment is
//! refused by the store with `ReferenceInUse`.

use crate::adapters::database::traits::{MedicationStore, PatientStore};
use crate::domain::errors::{EntityKind, MedtrackError};
use crate::domain::ids::{MedicationId, PatientId};
use crate::domain::medication::{Medication, NewMedication};
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::Result;
use std::sync::Arc;

/// Patient registry
pub struct PatientRegistry {
    store: Arc<dyn PatientStore + Send + Sync>,
}

impl PatientRegistry {
    pub fn new(store: Arc<dyn PatientStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub async fn create(&self, patient: NewPatient) -> Result<Patient> {
        let patient = self.store.insert_patient(&patient).await?;
        tracing::info!(patient_id = %patient.id, "Patient created");
        Ok(patient)
    }

    pub async fn list(&self) -> Result<Vec<Patient>> {
        self.store.list_patients().await
    }

    pub async fn get(&self, id: PatientId) -> Result<Patient> {
        self.store
            .get_patient(id)
            .await?
            .ok_or_else(|| not_found(EntityKind::Patient, id.get()))
    }

    pub async fn update(&self, id: PatientId, patient: NewPatient) -> Result<Patient> {
        if !self.store.update_patient(id, &patient).await? {
            return Err(not_found(EntityKind::Patient, id.get()));
        }
        tracing::info!(patient_id = %id, "Patient updated");
        Ok(patient.into_patient(id))
    }

    pub async fn delete(&self, id: PatientId) -> Result<()> {
        if !self.store.delete_patient(id).await? {
            return Err(not_found(EntityKind::Patient, id.get()));
        }
        tracing::info!(patient_id = %id, "Patient deleted");
        Ok(())
    }
}

/// Medication registry
pub struct MedicationRegistry {
    store: Arc<dyn MedicationStore + Send + Sync>,
}

impl MedicationRegistry {
    pub fn new(store: Arc<dyn MedicationStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub async fn create(&self, medication: NewMedication) -> Result<Medication> {
        let medication = self.store.insert_medication(&medication).await?;
        tracing::info!(medication_id = %medication.id, "Medication created");
        Ok(medication)
    }

    pub async fn list(&self) -> Result<Vec<Medication>> {
        self.store.list_medications().await
    }

    pub async fn get(&self, id: MedicationId) -> Result<Medication> {
        self.store
            .get_medication(id)
            .await?
            .ok_or_else(|| not_found(EntityKind::Medication, id.get()))
    }

    pub async fn update(&self, id: MedicationId, medication: NewMedication) -> Result<Medication> {
        if !self.store.update_medication(id, &medication).await? {
            return Err(not_found(EntityKind::Medication, id.get()));
        }
        tracing::info!(medication_id = %id, "Medication updated");
        Ok(medication.into_medication(id))
    }

    pub async fn delete(&self, id: MedicationId) -> Result<()> {
        if !self.store.delete_medication(id).await? {
            return Err(not_found(EntityKind::Medication, id.get()));
        }
        tracing::info!(medication_id = %id, "Medication deleted");
        Ok(())
    }
}

fn not_found(entity: EntityKind, id: i64) -> MedtrackError {
    MedtrackError::NotFound { entity, id }
}
