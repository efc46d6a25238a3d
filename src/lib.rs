// Medtrack - Medication treatment assignment service
// Copyright (c) 2025 Medtrack Contributors
// Licensed under the MIT License

//! # Medtrack - Medication treatment assignments
//!
//! Medtrack records which medication a patient takes, from which start date and
//! for how many days, and reports how many treatment days remain for each
//! assignment.
//!
//! ## Overview
//!
//! This library provides:
//! - **Assignments** linking an existing patient to an existing medication with
//!   a start date and a positive number of days
//! - **Remaining-days reports** for every assignment or for one patient identity
//! - **Patient and medication registries**
//! - **A REST API** under `/assignment`, `/patient` and `/medication`
//!
//! ## Architecture
//!
//! Medtrack follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP router, request parsing and response envelopes
//! - [`core`] - Business logic (service, validator, calculator, registries)
//! - [`adapters`] - Storage backends (in-memory, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medtrack::adapters::database::Stores;
//! use medtrack::api::AppState;
//! use medtrack::core::SystemClock;
//! use medtrack::domain::{NewAssignment, NewMedication, NewPatient, TreatmentTiming};
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(Stores::in_memory(), Arc::new(SystemClock::Local));
//!
//! let patient = state.patients.create(NewPatient {
//!     name: "Jane Roe".to_string(),
//!     date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
//! }).await?;
//! let medication = state.medications.create(NewMedication {
//!     name: "Amoxicillin".to_string(),
//!     dosage: "500mg".to_string(),
//!     frequency: "three times daily".to_string(),
//! }).await?;
//!
//! state.assignments.create(NewAssignment {
//!     patient_id: patient.id,
//!     medication_id: medication.id,
//!     timing: TreatmentTiming::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), 10)?,
//! }).await?;
//!
//! for row in state.assignments.compute_remaining_days_report().await? {
//!     println!("{}: {} days left", row.patient_name, row.remaining_days);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The library returns [`domain::MedtrackError`] everywhere; the API maps it to
//! HTTP statuses and the CLI to exit codes.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
