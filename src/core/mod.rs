//! Core business logic for Medtrack.
//!
//! # Modules
//!
//! - [`clock`] - Calendar source for "today"
//! - [`remaining`] - Remaining-days calculator and treatment status
//! - [`validator`] - Assignment reference validation
//! - [`service`] - Assignment lifecycle operations and reporting queries
//! - [`report`] - Remaining-days report rows
//! - [`registry`] - Patient and medication registries
//!
//! # Create Workflow
//!
//! 1. **Shape**: the caller builds a [`NewAssignment`](crate::domain::NewAssignment);
//!    its timing can only exist with `numberOfDays >= 1`
//! 2. **References**: the validator loads the patient, then the medication
//! 3. **Insert**: the store writes the row, re-checking the references
//! 4. **Respond**: the created record is returned with both relations
//!
//! # Example
//!
//! ```rust,no_run
//! use medtrack::adapters::memory::MemoryStore;
//! use medtrack::core::{AssignmentService, AssignmentValidator, SystemClock};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let validator = AssignmentValidator::new(store.clone(), store.clone());
//! let service = AssignmentService::new(store, validator, Arc::new(SystemClock::Local));
//!
//! for row in service.compute_remaining_days_report().await? {
//!     println!("{} {} {}", row.patient_name, row.medication_name, row.remaining_days);
//! }
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod registry;
pub mod remaining;
pub mod report;
pub mod service;
pub mod validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use registry::{MedicationRegistry, PatientRegistry};
pub use remaining::{remaining_days, TreatmentProgress, TreatmentStatus};
pub use report::{RemainingDaysRow, StatusCounts};
pub use service::AssignmentService;
pub use validator::{AssignmentValidator, ResolvedReferences};
