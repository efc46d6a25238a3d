//! In-memory store implementing all three store traits
//!
//! A single `RwLock` guards patients, medications and assignments together,
//! so reference checks and the writes they protect happen under one lock.

use crate::adapters::database::traits::{AssignmentStore, MedicationStore, PatientStore};
use crate::domain::assignment::{Assignment, AssignmentDetails, NewAssignment, TreatmentTiming};
use crate::domain::errors::{EntityKind, MedtrackError, StoreError};
use crate::domain::ids::{AssignmentId, MedicationId, PatientId};
use crate::domain::medication::{Medication, NewMedication};
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    patients: BTreeMap<PatientId, Patient>,
    medications: BTreeMap<MedicationId, Medication>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    last_patient_id: i64,
    last_medication_id: i64,
    last_assignment_id: i64,
}

impl State {
    fn resolve(&self, assignment: &Assignment) -> Result<AssignmentDetails> {
        let patient = self.patients.get(&assignment.patient_id).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "assignment {} references missing patient {}",
                assignment.id, assignment.patient_id
            ))
        })?;
        let medication = self.medications.get(&assignment.medication_id).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "assignment {} references missing medication {}",
                assignment.id, assignment.medication_id
            ))
        })?;

        assignment
            .clone()
            .with_relations(patient.clone(), medication.clone())
    }
}

/// Process-local store, used for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id<T: TryFrom<i64, Error = String>>(counter: &mut i64) -> Result<T> {
    *counter += 1;
    T::try_from(*counter).map_err(MedtrackError::Other)
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn insert_patient(&self, patient: &NewPatient) -> Result<Patient> {
        let mut state = self.state.write().await;
        let id: PatientId = next_id(&mut state.last_patient_id)?;
        let patient = patient.clone().into_patient(id);
        state.patients.insert(id, patient.clone());
        Ok(patient)
    }

    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        Ok(self.state.read().await.patients.get(&id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(self.state.read().await.patients.values().cloned().collect())
    }

    async fn update_patient(&self, id: PatientId, patient: &NewPatient) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.patients.get_mut(&id) {
            Some(existing) => {
                *existing = patient.clone().into_patient(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_patient(&self, id: PatientId) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.patients.contains_key(&id) {
            return Ok(false);
        }
        if state.assignments.values().any(|a| a.patient_id == id) {
            return Err(MedtrackError::ReferenceInUse {
                entity: EntityKind::Patient,
                id: id.get(),
            });
        }
        state.patients.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl MedicationStore for MemoryStore {
    async fn insert_medication(&self, medication: &NewMedication) -> Result<Medication> {
        let mut state = self.state.write().await;
        let id: MedicationId = next_id(&mut state.last_medication_id)?;
        let medication = medication.clone().into_medication(id);
        state.medications.insert(id, medication.clone());
        Ok(medication)
    }

    async fn get_medication(&self, id: MedicationId) -> Result<Option<Medication>> {
        Ok(self.state.read().await.medications.get(&id).cloned())
    }

    async fn list_medications(&self) -> Result<Vec<Medication>> {
        Ok(self.state.read().await.medications.values().cloned().collect())
    }

    async fn update_medication(
        &self,
        id: MedicationId,
        medication: &NewMedication,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.medications.get_mut(&id) {
            Some(existing) => {
                *existing = medication.clone().into_medication(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_medication(&self, id: MedicationId) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.medications.contains_key(&id) {
            return Ok(false);
        }
        if state.assignments.values().any(|a| a.medication_id == id) {
            return Err(MedtrackError::ReferenceInUse {
                entity: EntityKind::Medication,
                id: id.get(),
            });
        }
        state.medications.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn insert(&self, assignment: &NewAssignment) -> Result<AssignmentId> {
        let mut state = self.state.write().await;

        if !state.patients.contains_key(&assignment.patient_id) {
            return Err(MedtrackError::ReferenceNotFound {
                entity: EntityKind::Patient,
                id: assignment.patient_id.get(),
            });
        }
        if !state.medications.contains_key(&assignment.medication_id) {
            return Err(MedtrackError::ReferenceNotFound {
                entity: EntityKind::Medication,
                id: assignment.medication_id.get(),
            });
        }

        let id: AssignmentId = next_id(&mut state.last_assignment_id)?;
        state.assignments.insert(
            id,
            Assignment {
                id,
                patient_id: assignment.patient_id,
                medication_id: assignment.medication_id,
                timing: assignment.timing,
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, id: AssignmentId) -> Result<Option<AssignmentDetails>> {
        let state = self.state.read().await;
        state
            .assignments
            .get(&id)
            .map(|assignment| state.resolve(assignment))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<AssignmentDetails>> {
        let state = self.state.read().await;
        state
            .assignments
            .values()
            .map(|assignment| state.resolve(assignment))
            .collect()
    }

    async fn update_timing_by_id(
        &self,
        id: AssignmentId,
        timing: &TreatmentTiming,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.assignments.get_mut(&id) {
            Some(existing) => {
                existing.timing = *timing;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: AssignmentId) -> Result<bool> {
        Ok(self.state.write().await.assignments.remove(&id).is_some())
    }

    async fn find_by_patient_attributes(
        &self,
        name: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Vec<AssignmentDetails>> {
        let state = self.state.read().await;
        state
            .assignments
            .values()
            .filter(|assignment| {
                state
                    .patients
                    .get(&assignment.patient_id)
                    .is_some_and(|p| p.matches_identity(name, date_of_birth))
            })
            .map(|assignment| state.resolve(assignment))
            .collect()
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seed(store: &MemoryStore, name: &str, dob: NaiveDate) -> (PatientId, MedicationId) {
        let patient = store
            .insert_patient(&NewPatient {
                name: name.to_string(),
                date_of_birth: dob,
            })
            .await
            .unwrap();
        let medication = store
            .insert_medication(&NewMedication {
                name: format!("{name} medication"),
                dosage: "10mg".to_string(),
                frequency: "daily".to_string(),
            })
            .await
            .unwrap();
        (patient.id, medication.id)
    }

    #[tokio::test]
    async fn test_ids_increase_and_list_is_ordered() {
        let store = MemoryStore::new();
        let (p1, m1) = seed(&store, "A", date(1990, 1, 1)).await;
        let (p2, _) = seed(&store, "B", date(1991, 1, 1)).await;
        assert!(p2 > p1);

        let timing = TreatmentTiming::new(date(2025, 1, 1), 3).unwrap();
        let first = store
            .insert(&NewAssignment {
                patient_id: p2,
                medication_id: m1,
                timing,
            })
            .await
            .unwrap();
        let second = store
            .insert(&NewAssignment {
                patient_id: p1,
                medication_id: m1,
                timing,
            })
            .await
            .unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.iter().map(|a| a.id).collect::<Vec<_>>(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_insert_rechecks_references() {
        let store = MemoryStore::new();
        let (_, medication_id) = seed(&store, "A", date(1990, 1, 1)).await;

        let err = store
            .insert(&NewAssignment {
                patient_id: PatientId::new(500).unwrap(),
                medication_id,
                timing: TreatmentTiming::new(date(2025, 1, 1), 3).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MedtrackError::ReferenceNotFound {
                entity: EntityKind::Patient,
                id: 500
            }
        ));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_patient_attributes_matches_exactly() {
        let store = MemoryStore::new();
        let dob = date(1980, 6, 6);
        let (alice, med) = seed(&store, "Alice", dob).await;
        let (namesake, _) = seed(&store, "Alice", date(1981, 6, 6)).await;
        let timing = TreatmentTiming::new(date(2025, 2, 1), 10).unwrap();

        for patient_id in [alice, namesake] {
            store
                .insert(&NewAssignment {
                    patient_id,
                    medication_id: med,
                    timing,
                })
                .await
                .unwrap();
        }

        let found = store.find_by_patient_attributes("Alice", dob).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].patient.id, alice);
        assert!(store
            .find_by_patient_attributes("alice", dob)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_report_absence() {
        let store = MemoryStore::new();
        let missing = AssignmentId::new(3).unwrap();
        let timing = TreatmentTiming::new(date(2025, 1, 1), 3).unwrap();

        assert!(!store.update_timing_by_id(missing, &timing).await.unwrap());
        assert!(!store.delete_by_id(missing).await.unwrap());
    }
}
