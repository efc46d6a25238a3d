//! Domain models and types for Medtrack.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`MedicationId`], [`AssignmentId`])
//! - **Records** ([`Patient`], [`Medication`], [`Assignment`], [`AssignmentDetails`])
//! - **Treatment timing** ([`TreatmentTiming`]) with its `numberOfDays >= 1` invariant
//! - **Error types** ([`MedtrackError`], [`StoreError`], [`ValidationErrors`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes, so references cannot be mixed up:
//!
//! ```rust
//! use medtrack::domain::{PatientId, MedicationId};
//!
//! let patient_id = PatientId::new(1).unwrap();
//! let medication_id = MedicationId::new(1).unwrap();
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: PatientId = medication_id;
//! # let _ = (patient_id, medication_id);
//! ```

pub mod assignment;
pub mod calendar;
pub mod errors;
pub mod ids;
pub mod medication;
pub mod patient;
pub mod result;

// Re-export commonly used types for convenience
pub use assignment::{
    Assignment, AssignmentDetails, NewAssignment, TreatmentTiming, MAX_NUMBER_OF_DAYS,
};
pub use errors::{EntityKind, FieldError, MedtrackError, StoreError, ValidationErrors};
pub use ids::{AssignmentId, MedicationId, PatientId};
pub use medication::{Medication, NewMedication};
pub use patient::{NewPatient, Patient};
pub use result::Result;
