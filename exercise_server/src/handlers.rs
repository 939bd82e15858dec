//! Request handlers for the `/exercises` resource.

use crate::app::AppState;
use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use exercise_core::{Error, ExerciseCandidate, ExerciseFilter, ExerciseId, NewExercise};
use serde_json::Value;
use std::collections::HashMap;

/// Turn a raw body into a validated exercise, or reject with 400.
fn parse_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(ExerciseCandidate, NewExercise), ApiError> {
    let Json(value) = body.map_err(|e| {
        tracing::warn!("Unreadable request body: {}", e);
        ApiError::InvalidRequest
    })?;

    let candidate = ExerciseCandidate::from_json(value).map_err(|e| {
        tracing::warn!("Rejected request body: {}", e);
        ApiError::InvalidRequest
    })?;
    let exercise = candidate.parse().map_err(|e| {
        tracing::warn!("Rejected request body: {}", e);
        ApiError::InvalidRequest
    })?;

    Ok((candidate, exercise))
}

/// Bad identifiers are the caller's mistake; anything else is ours.
fn log_failure(action: &str, id: &str, e: &Error) {
    if e.is_client_error() {
        tracing::warn!("{} of {:?} rejected: {}", action, id, e);
    } else {
        tracing::error!("{} of {:?} failed: {}", action, id, e);
    }
}

/// `POST /exercises`
pub async fn create_exercise(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let (candidate, _) = parse_body(body)?;

    // The service has already logged the failure.
    match state.service.create_exercise(&candidate).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(record)).into_response()),
        Err(_) => Err(ApiError::InvalidRequest),
    }
}

/// `GET /exercises/:id`
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.service.find_exercise_by_id(&id).await {
        Ok(Some(record)) => Ok(Json(record).into_response()),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => {
            log_failure("Lookup", &id, &e);
            Err(ApiError::InvalidLookup)
        }
    }
}

/// `GET /exercises?name=&reps=&weight=&unit=&date=`
pub async fn list_exercises(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let filter = ExerciseFilter::from_query(&params).map_err(|e| {
        tracing::warn!("Rejected listing filter: {}", e);
        ApiError::RequestFailed
    })?;

    match state.service.find_exercises(&filter).await {
        Ok(records) => Ok(Json(records).into_response()),
        Err(e) => {
            tracing::error!("Listing failed: {}", e);
            Err(ApiError::RequestFailed)
        }
    }
}

/// `PUT /exercises/:id`
pub async fn replace_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let (candidate, exercise) = parse_body(body)?;

    match state.service.replace_exercise(&id, &candidate).await {
        Ok(0) => Err(ApiError::NotFound),
        Ok(_) => {
            let id = ExerciseId::parse(&id).map_err(|_| ApiError::RequestFailed)?;
            Ok(Json(exercise.into_record(id)).into_response())
        }
        Err(e) => {
            log_failure("Replace", &id, &e);
            Err(ApiError::RequestFailed)
        }
    }
}

/// `DELETE /exercises/:id`
pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.service.delete_by_id(&id).await {
        Ok(0) => Err(ApiError::NotFound),
        Ok(_) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => {
            log_failure("Delete", &id, &e);
            Err(ApiError::RequestFailed)
        }
    }
}
