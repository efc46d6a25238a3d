//! Patient endpoints under `/patient`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::api::dto::{self, IdQuery};
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::api::router::AppState;
use crate::domain::{Patient, PatientId};

type Reply<T> = Result<ApiResponse<T>, ApiError>;

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Patient> {
    let Json(body) = body?;
    let patient = state.patients.create(dto::parse_patient(body)?).await?;
    Ok(ApiResponse::created("Patient Created Successfully", patient))
}

pub async fn list(State(state): State<AppState>) -> Reply<Vec<Patient>> {
    let patients = state.patients.list().await?;
    Ok(ApiResponse::ok("Patients list retrieved successfully", patients))
}

pub async fn details(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Reply<Patient> {
    let id: PatientId = query.parse()?;
    let patient = state.patients.get(id).await?;
    Ok(ApiResponse::ok("Patient retrieved successfully", patient))
}

pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Patient> {
    let id: PatientId = query.parse()?;
    let Json(body) = body?;
    let patient = state.patients.update(id, dto::parse_patient(body)?).await?;
    Ok(ApiResponse::ok("Patient Updated successfully", patient))
}

/// Fails with 409 while assignments still reference the patient.
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ApiError> {
    let id: PatientId = query.parse()?;
    state.patients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
