//! Report command implementation
//!
//! Prints the remaining-days report for every assignment, or for the
//! assignments of one patient identity.

use crate::adapters::database::create_stores;
use crate::api::AppState;
use crate::config::{load_config, DatabaseTarget};
use crate::core::{RemainingDaysRow, StatusCounts, SystemClock};
use chrono::NaiveDate;
use clap::Args;
use std::fmt::Write as _;
use std::sync::Arc;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Patient name (exact match)
    #[arg(long, requires = "date_of_birth")]
    pub name: Option<String>,

    /// Patient date of birth (YYYY-MM-DD)
    #[arg(long, requires = "name")]
    pub date_of_birth: Option<NaiveDate>,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // A fresh in-memory store never holds assignments from a running server
        if config.database_target == DatabaseTarget::Memory {
            eprintln!(
                "The report command reads a persistent store; set database_target = \"postgresql\""
            );
            return Ok(2);
        }

        let stores = match create_stores(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize stores");
                eprintln!("Failed to connect to the database: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let clock = SystemClock::from_setting(&config.application.calendar);
        let service = AppState::new(stores, Arc::new(clock)).assignments;

        let rows = match (&self.name, self.date_of_birth) {
            (Some(name), Some(date_of_birth)) => {
                tracing::info!(name = %name, date_of_birth = %date_of_birth, "Patient report");
                service
                    .compute_remaining_days_for_patient(name, date_of_birth)
                    .await?
            }
            _ => service.compute_remaining_days_report().await?,
        };

        print!("{}", render_table(&rows));
        Ok(0)
    }
}

/// Render report rows as a fixed-width table with a status summary
pub fn render_table(rows: &[RemainingDaysRow]) -> String {
    if rows.is_empty() {
        return "No assignments found\n".to_string();
    }

    let patient_width = column_width("Patient", rows.iter().map(|r| r.patient_name.as_str()));
    let medication_width =
        column_width("Medication", rows.iter().map(|r| r.medication_name.as_str()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<patient_width$}  {:<medication_width$}  {:>9}  Status",
        "ID", "Patient", "Medication", "Remaining"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>6}  {:<patient_width$}  {:<medication_width$}  {:>9}  {}",
            row.assignment_id.get(),
            row.patient_name,
            row.medication_name,
            row.remaining_days,
            row.status
        );
    }

    let counts = StatusCounts::tally(rows);
    let _ = writeln!(
        out,
        "\n{} assignments: {} active, {} completed",
        rows.len(),
        counts.active,
        counts.completed
    );
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TreatmentStatus;
    use crate::domain::AssignmentId;

    fn row(id: i64, patient: &str, remaining: i64, status: TreatmentStatus) -> RemainingDaysRow {
        RemainingDaysRow {
            assignment_id: AssignmentId::new(id).unwrap(),
            patient_name: patient.to_string(),
            medication_name: "Amoxicillin".to_string(),
            remaining_days: remaining,
            status,
        }
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_table(&[]), "No assignments found\n");
    }

    #[test]
    fn test_render_rows_and_summary() {
        let rows = vec![
            row(1, "Ann", 4, TreatmentStatus::Active),
            row(2, "Bartholomew", 0, TreatmentStatus::Completed),
        ];
        let table = render_table(&rows);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains("Patient"));
        assert!(lines[1].contains("Ann"));
        assert!(lines[1].ends_with("active"));
        assert!(lines[2].contains("Bartholomew"));
        assert!(lines[2].ends_with("completed"));
        assert!(table.ends_with("2 assignments: 1 active, 1 completed\n"));
    }

    #[tokio::test]
    async fn test_missing_config_is_configuration_error() {
        let args = ReportArgs {
            name: None,
            date_of_birth: None,
        };
        assert_eq!(args.execute("/nonexistent/medtrack.toml").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_memory_target_is_configuration_error() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"database_target = \"memory\"\n").unwrap();
        file.flush().unwrap();

        let args = ReportArgs {
            name: Some("Jane Roe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2),
        };
        let path = file.path().to_str().unwrap();
        assert_eq!(args.execute(path).await.unwrap(), 2);
    }
}
