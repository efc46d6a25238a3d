//! Store abstraction layer
//!
//! Trait-based store contracts plus the factory that picks a backend
//! (in-memory or PostgreSQL) from configuration.

pub mod factory;
pub mod traits;

pub use factory::{create_stores, Stores};
pub use traits::{AssignmentStore, MedicationStore, PatientStore};
