//! Integration tests for the assignment service over the in-memory store
//!
//! "Today" is pinned with a fixed clock so remaining-days values are exact.

use chrono::{Duration, NaiveDate};
use fake::faker::name::en::Name;
use fake::Fake;
use medtrack::adapters::database::Stores;
use medtrack::api::AppState;
use medtrack::core::{remaining_days, FixedClock, TreatmentStatus};
use medtrack::domain::{
    AssignmentId, EntityKind, MedicationId, MedtrackError, NewAssignment, NewMedication,
    NewPatient, PatientId, TreatmentTiming,
};
use std::sync::Arc;
use test_case::test_case;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
}

fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

fn state() -> AppState {
    AppState::new(Stores::in_memory(), Arc::new(FixedClock(today())))
}

async fn add_patient(state: &AppState, name: &str, date_of_birth: NaiveDate) -> PatientId {
    state
        .patients
        .create(NewPatient {
            name: name.to_string(),
            date_of_birth,
        })
        .await
        .unwrap()
        .id
}

async fn add_random_patient(state: &AppState) -> PatientId {
    let name: String = Name().fake();
    add_patient(state, &name, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()).await
}

async fn add_medication(state: &AppState, name: &str) -> MedicationId {
    state
        .medications
        .create(NewMedication {
            name: name.to_string(),
            dosage: "10mg".to_string(),
            frequency: "once daily".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn new_assignment(
    patient_id: PatientId,
    medication_id: MedicationId,
    start_date: NaiveDate,
    number_of_days: i64,
) -> NewAssignment {
    NewAssignment {
        patient_id,
        medication_id,
        timing: TreatmentTiming::new(start_date, number_of_days).unwrap(),
    }
}

#[test_case(0, 7 => 7; "starts today")]
#[test_case(1, 7 => 6; "one day in")]
#[test_case(4, 3 => 0; "finished four days ago")]
#[test_case(3, 3 => 0; "last day passed")]
#[test_case(-2, 5 => 7; "starts in two days")]
fn remaining_days_cases(elapsed: i64, number_of_days: u32) -> i64 {
    remaining_days(today(), days_ago(elapsed), number_of_days)
}

#[test]
fn remaining_days_never_increases_and_stops_at_zero() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut previous = i64::MAX;
    for offset in 0..30 {
        let value = remaining_days(start + Duration::days(offset), start, 10);
        assert!(value <= previous);
        assert!(value >= 0);
        if offset >= 10 {
            assert_eq!(value, 0);
        }
        previous = value;
    }
}

#[tokio::test]
async fn create_returns_record_with_relations() {
    let state = state();
    let patient_id = add_patient(&state, "Maria Lopez", NaiveDate::from_ymd_opt(1972, 6, 30).unwrap()).await;
    let medication_id = add_medication(&state, "Metformin").await;

    let created = state
        .assignments
        .create(new_assignment(patient_id, medication_id, today(), 7))
        .await
        .unwrap();

    assert_eq!(created.patient.id, patient_id);
    assert_eq!(created.patient.name, "Maria Lopez");
    assert_eq!(created.medication.id, medication_id);
    assert_eq!(created.medication.name, "Metformin");
    assert_eq!(created.timing.number_of_days(), 7);

    let fetched = state.assignments.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_with_missing_patient_names_the_patient() {
    let state = state();
    add_medication(&state, "Metformin").await;

    let err = state
        .assignments
        .create(new_assignment(
            PatientId::new(999).unwrap(),
            MedicationId::new(998).unwrap(),
            today(),
            5,
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedtrackError::ReferenceNotFound {
            entity: EntityKind::Patient,
            id: 999
        }
    ));
    assert!(state.assignments.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_missing_medication_names_the_medication() {
    let state = state();
    let patient_id = add_random_patient(&state).await;

    let err = state
        .assignments
        .create(new_assignment(patient_id, MedicationId::new(42).unwrap(), today(), 5))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedtrackError::ReferenceNotFound {
            entity: EntityKind::Medication,
            id: 42
        }
    ));
}

#[test]
fn non_positive_duration_is_rejected_before_any_store_access() {
    assert!(matches!(
        TreatmentTiming::new(today(), 0),
        Err(MedtrackError::Validation(_))
    ));
    assert!(TreatmentTiming::new(today(), -3).is_err());
}

#[tokio::test]
async fn update_changes_timing_only() {
    let state = state();
    let patient_id = add_random_patient(&state).await;
    let medication_id = add_medication(&state, "Lisinopril").await;
    let created = state
        .assignments
        .create(new_assignment(patient_id, medication_id, days_ago(10), 30))
        .await
        .unwrap();

    let new_timing = TreatmentTiming::new(days_ago(1), 14).unwrap();
    let updated = state
        .assignments
        .update(created.id, new_timing)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.timing, new_timing);
    assert_eq!(updated.patient, created.patient);
    assert_eq!(updated.medication, created.medication);
}

#[tokio::test]
async fn update_of_absent_assignment_leaves_store_unchanged() {
    let state = state();
    let patient_id = add_random_patient(&state).await;
    let medication_id = add_medication(&state, "Lisinopril").await;
    let created = state
        .assignments
        .create(new_assignment(patient_id, medication_id, today(), 3))
        .await
        .unwrap();

    let err = state
        .assignments
        .update(
            AssignmentId::new(created.id.get() + 100).unwrap(),
            TreatmentTiming::new(today(), 9).unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, MedtrackError::AssignmentNotFound(_)));
    assert_eq!(state.assignments.list_all().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn delete_is_authoritative() {
    let state = state();
    let patient_id = add_random_patient(&state).await;
    let medication_id = add_medication(&state, "Warfarin").await;
    let created = state
        .assignments
        .create(new_assignment(patient_id, medication_id, today(), 3))
        .await
        .unwrap();

    state.assignments.delete(created.id).await.unwrap();

    assert!(matches!(
        state.assignments.get_by_id(created.id).await,
        Err(MedtrackError::AssignmentNotFound(_))
    ));
    assert!(matches!(
        state.assignments.delete(created.id).await,
        Err(MedtrackError::AssignmentNotFound(_))
    ));
}

#[tokio::test]
async fn report_has_one_row_per_assignment() {
    let state = state();
    let medication_id = add_medication(&state, "Amoxicillin").await;

    let completed_patient = add_random_patient(&state).await;
    let completed = state
        .assignments
        .create(new_assignment(completed_patient, medication_id, days_ago(4), 3))
        .await
        .unwrap();

    let active_patient = add_random_patient(&state).await;
    let active = state
        .assignments
        .create(new_assignment(active_patient, medication_id, today(), 7))
        .await
        .unwrap();

    let rows = state.assignments.compute_remaining_days_report().await.unwrap();
    assert_eq!(rows.len(), state.assignments.list_all().await.unwrap().len());

    assert_eq!(rows[0].assignment_id, completed.id);
    assert_eq!(rows[0].remaining_days, 0);
    assert_eq!(rows[0].status, TreatmentStatus::Completed);
    assert_eq!(rows[0].medication_name, "Amoxicillin");

    assert_eq!(rows[1].assignment_id, active.id);
    assert_eq!(rows[1].remaining_days, 7);
    assert_eq!(rows[1].status, TreatmentStatus::Active);
    assert_eq!(rows[1].patient_name, active.patient.name);
}

#[tokio::test]
async fn patient_report_requires_exact_name_and_birth_date() {
    let state = state();
    let born = NaiveDate::from_ymd_opt(1990, 4, 2).unwrap();
    let medication_id = add_medication(&state, "Ibuprofen").await;

    let jane = add_patient(&state, "Jane Roe", born).await;
    let namesake = add_patient(&state, "Jane Roe", born + Duration::days(1)).await;
    let other = add_patient(&state, "Jane Doe", born).await;

    for patient_id in [jane, namesake, other] {
        state
            .assignments
            .create(new_assignment(patient_id, medication_id, days_ago(2), 5))
            .await
            .unwrap();
    }

    let rows = state
        .assignments
        .compute_remaining_days_for_patient("Jane Roe", born)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].patient_name, "Jane Roe");
    assert_eq!(rows[0].remaining_days, 3);

    let nobody = state
        .assignments
        .compute_remaining_days_for_patient("jane roe", born)
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn referenced_patient_cannot_be_deleted() {
    let state = state();
    let patient_id = add_random_patient(&state).await;
    let medication_id = add_medication(&state, "Prednisone").await;
    let created = state
        .assignments
        .create(new_assignment(patient_id, medication_id, today(), 5))
        .await
        .unwrap();

    assert!(matches!(
        state.patients.delete(patient_id).await,
        Err(MedtrackError::ReferenceInUse {
            entity: EntityKind::Patient,
            ..
        })
    ));
    assert!(matches!(
        state.medications.delete(medication_id).await,
        Err(MedtrackError::ReferenceInUse {
            entity: EntityKind::Medication,
            ..
        })
    ));

    state.assignments.delete(created.id).await.unwrap();
    state.patients.delete(patient_id).await.unwrap();
    state.medications.delete(medication_id).await.unwrap();
}
