//! Domain error types
//!
//! This module defines the error hierarchy for Medtrack. All errors are
//! domain-specific and don't expose third-party types; backend failures are
//! wrapped in [`StoreError`] before they reach the service layer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind of record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A patient record
    Patient,
    /// A medication record
    Medication,
    /// A treatment assignment
    Assignment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Patient => "Patient",
            EntityKind::Medication => "Medication",
            EntityKind::Assignment => "Assignment",
        };
        f.write_str(name)
    }
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as the caller spelled it
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    /// Creates a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collection of field-level validation failures
///
/// Input validation collects every failing field instead of stopping at the
/// first one, so callers see the full list in one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a collection holding a single field error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    /// Records a failing field
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Returns true when no field failed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded field errors
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the messages in the order they were recorded
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    /// Converts into `Err` when at least one field failed
    pub fn into_result(self) -> Result<(), MedtrackError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(MedtrackError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

/// Main Medtrack error type
#[derive(Debug, Error)]
pub enum MedtrackError {
    /// Malformed or out-of-range input, rejected before any store access
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A referenced patient or medication does not exist
    #[error("{entity} with id {id} not found")]
    ReferenceNotFound { entity: EntityKind, id: i64 },

    /// The addressed assignment does not exist
    #[error("Assignment with id {0} not found")]
    AssignmentNotFound(i64),

    /// The addressed patient or medication does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// A patient or medication cannot be removed while assignments reference it
    #[error("{entity} with id {id} is referenced by existing assignments")]
    ReferenceInUse { entity: EntityKind, id: i64 },

    /// Storage backend errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl MedtrackError {
    /// Shorthand for a single-field validation failure
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        MedtrackError::Validation(ValidationErrors::single(field, message))
    }

    /// Returns true for the not-found family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MedtrackError::ReferenceNotFound { .. }
                | MedtrackError::AssignmentNotFound(_)
                | MedtrackError::NotFound { .. }
        )
    }
}

/// Storage backend errors
///
/// Raised by the store adapters. Foreign-key violations carry the name of the
/// violated constraint so adapters can translate them into domain errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to obtain a connection
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Failed to run a query or statement
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A foreign-key constraint rejected the write
    #[error("Foreign key violation on constraint {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// A row could not be mapped onto a domain type
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MedtrackError {
    fn from(err: std::io::Error) -> Self {
        MedtrackError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MedtrackError {
    fn from(err: serde_json::Error) -> Self {
        MedtrackError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MedtrackError {
    fn from(err: toml::de::Error) -> Self {
        MedtrackError::Configuration(format!("TOML parse error: {err}"))
    }
}
