//! HTTP router
//!
//! Mounts the assignment, patient and medication endpoints on one `Router`
//! with CORS and request tracing applied to every route.

use std::sync::Arc;

use axum::extract::OriginalUri;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::database::Stores;
use crate::api::error::ApiError;
use crate::api::handlers::{assignment, medication, patient};
use crate::core::{AssignmentService, AssignmentValidator, Clock, MedicationRegistry, PatientRegistry};
use crate::domain::{MedtrackError, Result};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub assignments: Arc<AssignmentService>,
    pub patients: Arc<PatientRegistry>,
    pub medications: Arc<MedicationRegistry>,
}

impl AppState {
    /// Wire the services over one set of stores
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let validator = AssignmentValidator::new(stores.patients.clone(), stores.medications.clone());
        Self {
            assignments: Arc::new(AssignmentService::new(stores.assignments, validator, clock)),
            patients: Arc::new(PatientRegistry::new(stores.patients)),
            medications: Arc::new(MedicationRegistry::new(stores.medications)),
        }
    }
}

/// Build the application router
///
/// # Errors
///
/// Returns a configuration error if `cors_allowed_origin` is not a valid
/// header value.
pub fn build_router(state: AppState, cors_allowed_origin: &str) -> Result<Router> {
    let origin = HeaderValue::from_str(cors_allowed_origin).map_err(|e| {
        MedtrackError::Configuration(format!(
            "Invalid CORS origin '{cors_allowed_origin}': {e}"
        ))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let assignments = Router::new()
        .route("/create-assignment", post(assignment::create))
        .route("/assignment-list", get(assignment::list))
        .route("/assignment-details", get(assignment::details))
        .route("/assignment-update", put(assignment::update))
        .route("/assignment-remove", delete(assignment::remove))
        .route("/remaining-days", get(assignment::remaining_days))
        .route("/patient-remaining-days", post(assignment::patient_remaining_days));

    let patients = Router::new()
        .route("/create-patient", post(patient::create))
        .route("/patient-list", get(patient::list))
        .route("/patient-details", get(patient::details))
        .route("/patient-update", put(patient::update))
        .route("/patient-remove", delete(patient::remove));

    let medications = Router::new()
        .route("/create-medication", post(medication::create))
        .route("/medication-list", get(medication::list))
        .route("/medication-details", get(medication::details))
        .route("/medication-update", put(medication::update))
        .route("/medication-remove", delete(medication::remove));

    Ok(Router::new()
        .nest("/assignment", assignments)
        .nest("/patient", patients)
        .nest("/medication", medications)
        .fallback(unknown_route)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

async fn unknown_route(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Cannot {method} {}", uri.path()))
}
