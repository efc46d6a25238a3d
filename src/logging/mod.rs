//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output
//! - JSON file output with rotation
//! - Domain macros that keep field names consistent across modules
//!
//! # Example
//!
//! ```no_run
//! use medtrack::logging::init_logging;
//! use medtrack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a newly created assignment
///
/// # Example
///
/// ```no_run
/// use medtrack::log_assignment_created;
/// use medtrack::domain::{AssignmentId, MedicationId, PatientId};
///
/// let id = AssignmentId::new(1).unwrap();
/// let patient_id = PatientId::new(2).unwrap();
/// let medication_id = MedicationId::new(3).unwrap();
/// log_assignment_created!(id, patient_id, medication_id, 14);
/// ```
#[macro_export]
macro_rules! log_assignment_created {
    ($id:expr, $patient_id:expr, $medication_id:expr, $number_of_days:expr) => {
        tracing::info!(
            assignment_id = %$id,
            patient_id = %$patient_id,
            medication_id = %$medication_id,
            number_of_days = $number_of_days,
            "Assignment created"
        );
    };
}

/// Log a generated remaining-days report
///
/// # Example
///
/// ```no_run
/// use medtrack::log_report_generated;
///
/// let today = chrono::NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
/// log_report_generated!(today, 12);
/// ```
#[macro_export]
macro_rules! log_report_generated {
    ($today:expr, $rows:expr) => {
        tracing::info!(
            today = %$today,
            rows = $rows,
            "Remaining-days report generated"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use medtrack::log_error_with_context;
/// use medtrack::domain::MedtrackError;
///
/// let error = MedtrackError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{AssignmentId, MedicationId, MedtrackError, PatientId};

    #[test]
    fn test_macros_expand_without_subscriber() {
        let id = AssignmentId::new(1).unwrap();
        let patient_id = PatientId::new(2).unwrap();
        let medication_id = MedicationId::new(3).unwrap();
        log_assignment_created!(id, patient_id, medication_id, 14u32);

        let today = chrono::NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        log_report_generated!(today, 3usize);

        let error = MedtrackError::Other("boom".to_string());
        log_error_with_context!(&error, "while testing");
    }
}
