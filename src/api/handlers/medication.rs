//! Medication endpoints under `/medication`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::api::dto::{self, IdQuery};
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::api::router::AppState;
use crate::domain::{Medication, MedicationId};

type Reply<T> = Result<ApiResponse<T>, ApiError>;

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Medication> {
    let Json(body) = body?;
    let medication = state
        .medications
        .create(dto::parse_medication(body)?)
        .await?;
    Ok(ApiResponse::created(
        "Medication Created Successfully",
        medication,
    ))
}

pub async fn list(State(state): State<AppState>) -> Reply<Vec<Medication>> {
    let medications = state.medications.list().await?;
    Ok(ApiResponse::ok(
        "Medications list retrieved successfully",
        medications,
    ))
}

pub async fn details(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Reply<Medication> {
    let id: MedicationId = query.parse()?;
    let medication = state.medications.get(id).await?;
    Ok(ApiResponse::ok("Medication retrieved successfully", medication))
}

pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Medication> {
    let id: MedicationId = query.parse()?;
    let Json(body) = body?;
    let medication = state
        .medications
        .update(id, dto::parse_medication(body)?)
        .await?;
    Ok(ApiResponse::ok("Medication Updated successfully", medication))
}

pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ApiError> {
    let id: MedicationId = query.parse()?;
    state.medications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
