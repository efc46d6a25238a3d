//! PostgreSQL adapter implementing the store traits
//!
//! Referential integrity is left to the foreign keys in the schema. Their
//! violations come back from the client as
//! [`StoreError::ForeignKeyViolation`] and are translated here into
//! `ReferenceNotFound` (insert) or `ReferenceInUse` (delete).

use crate::adapters::database::traits::{AssignmentStore, MedicationStore, PatientStore};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    number_of_days_column, AssignmentDetailsRow, MedicationRow, PatientRow,
};
use crate::domain::assignment::{AssignmentDetails, NewAssignment, TreatmentTiming};
use crate::domain::errors::{EntityKind, MedtrackError, StoreError};
use crate::domain::ids::{AssignmentId, MedicationId, PatientId};
use crate::domain::medication::{Medication, NewMedication};
use crate::domain::patient::{NewPatient, Patient};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Constraint names declared in `migrations/001_initial_schema.sql`
const ASSIGNMENT_PATIENT_FK: &str = "assignments_patient_id_fkey";
const ASSIGNMENT_MEDICATION_FK: &str = "assignments_medication_id_fkey";

const SELECT_DETAILS: &str = r#"
    SELECT a.id, a.start_date, a.number_of_days,
           p.id AS patient_id, p.name AS patient_name,
           p.date_of_birth AS patient_date_of_birth,
           m.id AS medication_id, m.name AS medication_name,
           m.dosage AS medication_dosage, m.frequency AS medication_frequency
    FROM assignments a
    JOIN patients p ON p.id = a.patient_id
    JOIN medications m ON m.id = a.medication_id
"#;

/// PostgreSQL implementation of the store traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    async fn select_details(
        &self,
        filter: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<AssignmentDetails>> {
        let query = format!("{SELECT_DETAILS} {filter} ORDER BY a.id");
        self.client
            .query(&query, params)
            .await?
            .iter()
            .map(|row| AssignmentDetailsRow::from_row(row)?.into_domain())
            .collect()
    }
}

/// Translate an insert-time FK violation into the missing reference
fn missing_reference(err: MedtrackError, assignment: &NewAssignment) -> MedtrackError {
    let missing = match &err {
        MedtrackError::Store(StoreError::ForeignKeyViolation { constraint }) => {
            match constraint.as_str() {
                ASSIGNMENT_PATIENT_FK => Some((EntityKind::Patient, assignment.patient_id.get())),
                ASSIGNMENT_MEDICATION_FK => {
                    Some((EntityKind::Medication, assignment.medication_id.get()))
                }
                _ => None,
            }
        }
        _ => None,
    };

    match missing {
        Some((entity, id)) => MedtrackError::ReferenceNotFound { entity, id },
        None => err,
    }
}

/// Translate a delete-time FK violation into a still-referenced record
fn still_referenced(err: MedtrackError, entity: EntityKind, id: i64) -> MedtrackError {
    match err {
        MedtrackError::Store(StoreError::ForeignKeyViolation { .. }) => {
            MedtrackError::ReferenceInUse { entity, id }
        }
        other => other,
    }
}

#[async_trait]
impl PatientStore for PostgreSQLAdapter {
    async fn insert_patient(&self, patient: &NewPatient) -> Result<Patient> {
        let row = self
            .client
            .query_one(
                "INSERT INTO patients (name, date_of_birth) VALUES ($1, $2) \
                 RETURNING id, name, date_of_birth",
                &[&patient.name, &patient.date_of_birth],
            )
            .await?;
        PatientRow::from_row(&row)?.into_domain()
    }

    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        self.client
            .query_opt(
                "SELECT id, name, date_of_birth FROM patients WHERE id = $1",
                &[&id.get()],
            )
            .await?
            .map(|row| PatientRow::from_row(&row)?.into_domain())
            .transpose()
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.client
            .query("SELECT id, name, date_of_birth FROM patients ORDER BY id", &[])
            .await?
            .iter()
            .map(|row| PatientRow::from_row(row)?.into_domain())
            .collect()
    }

    async fn update_patient(&self, id: PatientId, patient: &NewPatient) -> Result<bool> {
        let affected = self
            .client
            .execute(
                "UPDATE patients SET name = $2, date_of_birth = $3 WHERE id = $1",
                &[&id.get(), &patient.name, &patient.date_of_birth],
            )
            .await?;
        Ok(affected > 0)
    }

    async fn delete_patient(&self, id: PatientId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM patients WHERE id = $1", &[&id.get()])
            .await
            .map_err(|e| still_referenced(e, EntityKind::Patient, id.get()))?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl MedicationStore for PostgreSQLAdapter {
    async fn insert_medication(&self, medication: &NewMedication) -> Result<Medication> {
        let row = self
            .client
            .query_one(
                "INSERT INTO medications (name, dosage, frequency) VALUES ($1, $2, $3) \
                 RETURNING id, name, dosage, frequency",
                &[&medication.name, &medication.dosage, &medication.frequency],
            )
            .await?;
        MedicationRow::from_row(&row)?.into_domain()
    }

    async fn get_medication(&self, id: MedicationId) -> Result<Option<Medication>> {
        self.client
            .query_opt(
                "SELECT id, name, dosage, frequency FROM medications WHERE id = $1",
                &[&id.get()],
            )
            .await?
            .map(|row| MedicationRow::from_row(&row)?.into_domain())
            .transpose()
    }

    async fn list_medications(&self) -> Result<Vec<Medication>> {
        self.client
            .query(
                "SELECT id, name, dosage, frequency FROM medications ORDER BY id",
                &[],
            )
            .await?
            .iter()
            .map(|row| MedicationRow::from_row(row)?.into_domain())
            .collect()
    }

    async fn update_medication(
        &self,
        id: MedicationId,
        medication: &NewMedication,
    ) -> Result<bool> {
        let affected = self
            .client
            .execute(
                "UPDATE medications SET name = $2, dosage = $3, frequency = $4 WHERE id = $1",
                &[
                    &id.get(),
                    &medication.name,
                    &medication.dosage,
                    &medication.frequency,
                ],
            )
            .await?;
        Ok(affected > 0)
    }

    async fn delete_medication(&self, id: MedicationId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM medications WHERE id = $1", &[&id.get()])
            .await
            .map_err(|e| still_referenced(e, EntityKind::Medication, id.get()))?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl AssignmentStore for PostgreSQLAdapter {
    async fn insert(&self, assignment: &NewAssignment) -> Result<AssignmentId> {
        let number_of_days = number_of_days_column(&assignment.timing);
        let start_date = assignment.timing.start_date();

        let row = self
            .client
            .query_one(
                "INSERT INTO assignments (patient_id, medication_id, start_date, number_of_days) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
                &[
                    &assignment.patient_id.get(),
                    &assignment.medication_id.get(),
                    &start_date,
                    &number_of_days,
                ],
            )
            .await
            .map_err(|e| missing_reference(e, assignment))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| StoreError::InvalidData(format!("column id: {e}")))?;
        AssignmentId::new(id).map_err(|e| StoreError::InvalidData(e).into())
    }

    async fn get_by_id(&self, id: AssignmentId) -> Result<Option<AssignmentDetails>> {
        Ok(self
            .select_details("WHERE a.id = $1", &[&id.get()])
            .await?
            .into_iter()
            .next())
    }

    async fn list_all(&self) -> Result<Vec<AssignmentDetails>> {
        self.select_details("", &[]).await
    }

    async fn update_timing_by_id(
        &self,
        id: AssignmentId,
        timing: &TreatmentTiming,
    ) -> Result<bool> {
        let number_of_days = number_of_days_column(timing);
        let start_date = timing.start_date();

        let affected = self
            .client
            .execute(
                "UPDATE assignments SET start_date = $2, number_of_days = $3 WHERE id = $1",
                &[&id.get(), &start_date, &number_of_days],
            )
            .await?;
        Ok(affected > 0)
    }

    async fn delete_by_id(&self, id: AssignmentId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM assignments WHERE id = $1", &[&id.get()])
            .await?;
        Ok(affected > 0)
    }

    async fn find_by_patient_attributes(
        &self,
        name: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Vec<AssignmentDetails>> {
        self.select_details(
            "WHERE p.name = $1 AND p.date_of_birth = $2",
            &[&name, &date_of_birth],
        )
        .await
    }

    fn backend_name(&self) -> &str {
        "postgresql"
    }
}
