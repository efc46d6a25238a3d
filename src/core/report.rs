//! Remaining-days report rows

use crate::core::remaining::{TreatmentProgress, TreatmentStatus};
use crate::domain::assignment::AssignmentDetails;
use crate::domain::ids::AssignmentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One assignment's treatment progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingDaysRow {
    pub assignment_id: AssignmentId,
    pub patient_name: String,
    pub medication_name: String,
    pub remaining_days: i64,
    pub status: TreatmentStatus,
}

impl RemainingDaysRow {
    /// Evaluates one assignment against `today`
    pub fn from_details(today: NaiveDate, details: &AssignmentDetails) -> Self {
        let progress = TreatmentProgress::evaluate(today, &details.timing);
        Self {
            assignment_id: details.id,
            patient_name: details.patient.name.clone(),
            medication_name: details.medication.name.clone(),
            remaining_days: progress.remaining_days,
            status: progress.status,
        }
    }
}

/// Builds one row per assignment, all evaluated against the same `today`
pub fn build_rows(today: NaiveDate, assignments: &[AssignmentDetails]) -> Vec<RemainingDaysRow> {
    assignments
        .iter()
        .map(|details| RemainingDaysRow::from_details(today, details))
        .collect()
}

/// Counts of rows per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Tallies the statuses of a report
    pub fn tally(rows: &[RemainingDaysRow]) -> Self {
        rows.iter().fold(Self::default(), |mut counts, row| {
            match row.status {
                TreatmentStatus::Active => counts.active += 1,
                TreatmentStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assignment::TreatmentTiming;
    use crate::domain::ids::{MedicationId, PatientId};
    use crate::domain::medication::Medication;
    use crate::domain::patient::Patient;

    fn details(id: i64, start: NaiveDate, days: i64) -> AssignmentDetails {
        AssignmentDetails {
            id: AssignmentId::new(id).unwrap(),
            timing: TreatmentTiming::new(start, days).unwrap(),
            patient: Patient {
                id: PatientId::new(1).unwrap(),
                name: "Patient 1".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            },
            medication: Medication {
                id: MedicationId::new(1).unwrap(),
                name: "Ibuprofen".to_string(),
                dosage: "400mg".to_string(),
                frequency: "every 6 hours".to_string(),
            },
        }
    }

    #[test]
    fn test_rows_share_today_and_preserve_cardinality() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let assignments = vec![
            details(1, NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(), 3),
            details(2, today, 7),
        ];

        let rows = build_rows(today, &assignments);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].remaining_days, 0);
        assert_eq!(rows[0].status, TreatmentStatus::Completed);
        assert_eq!(rows[1].remaining_days, 7);
        assert_eq!(rows[1].medication_name, "Ibuprofen");

        let counts = StatusCounts::tally(&rows);
        assert_eq!(counts, StatusCounts { active: 1, completed: 1 });
    }

    #[test]
    fn test_row_json_shape() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let row = RemainingDaysRow::from_details(today, &details(5, today, 2));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["assignmentId"], 5);
        assert_eq!(json["patientName"], "Patient 1");
        assert_eq!(json["medicationName"], "Ibuprofen");
        assert_eq!(json["remainingDays"], 2);
        assert_eq!(json["status"], "active");
    }
}
