//! Assignment endpoints under `/assignment`
//!
//! - `POST   /create-assignment`
//! - `GET    /assignment-list`
//! - `GET    /assignment-details?id=`
//! - `PUT    /assignment-update?id=`
//! - `DELETE /assignment-remove?id=`
//! - `GET    /remaining-days`
//! - `POST   /patient-remaining-days`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::api::dto::{self, IdQuery};
use crate::api::error::ApiError;
use crate::api::response::ApiResponse;
use crate::api::router::AppState;
use crate::core::RemainingDaysRow;
use crate::domain::{AssignmentDetails, AssignmentId};

type Reply<T> = Result<ApiResponse<T>, ApiError>;

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<AssignmentDetails> {
    let Json(body) = body?;
    let new_assignment = dto::parse_create_assignment(body)?;
    let created = state.assignments.create(new_assignment).await?;
    Ok(ApiResponse::created("Assignment Created Successfully", created))
}

pub async fn list(State(state): State<AppState>) -> Reply<Vec<AssignmentDetails>> {
    let assignments = state.assignments.list_all().await?;
    Ok(ApiResponse::ok(
        "Assignments list retrieved successfully",
        assignments,
    ))
}

pub async fn details(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Reply<AssignmentDetails> {
    let id: AssignmentId = query.parse()?;
    let assignment = state.assignments.get_by_id(id).await?;
    Ok(ApiResponse::ok("Assignment retrieved successfully", assignment))
}

/// Only the timing changes; the id is validated before the body.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<AssignmentDetails> {
    let id: AssignmentId = query.parse()?;
    let Json(body) = body?;
    let timing = dto::parse_update_assignment(body)?;
    let updated = state.assignments.update(id, timing).await?;
    Ok(ApiResponse::ok("Assignment Updated successfully", updated))
}

pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ApiError> {
    let id: AssignmentId = query.parse()?;
    state.assignments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remaining_days(State(state): State<AppState>) -> Reply<Vec<RemainingDaysRow>> {
    let rows = state.assignments.compute_remaining_days_report().await?;
    Ok(ApiResponse::ok(
        "Remaining treatment days retrieved successfully",
        rows,
    ))
}

pub async fn patient_remaining_days(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Reply<Vec<RemainingDaysRow>> {
    let Json(body) = body?;
    let (name, date_of_birth) = dto::parse_patient_identity(body)?;
    let rows = state
        .assignments
        .compute_remaining_days_for_patient(&name, date_of_birth)
        .await?;
    Ok(ApiResponse::ok(
        format!("Remaining treatment days of {name} retrieved successfully"),
        rows,
    ))
}
