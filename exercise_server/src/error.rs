//! HTTP error responses.
//!
//! Every failure is reported as a JSON body of the form `{"Error": "..."}`.
//! The wording differs per endpoint, so handlers pick the variant explicitly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error outcome of a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Body failed validation, or create failed in the store
    InvalidRequest,
    /// Single-record lookup with a malformed id or a store failure
    InvalidLookup,
    /// No record with the requested id
    NotFound,
    /// Listing, replace or delete failed after validation
    RequestFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest | ApiError::InvalidLookup | ApiError::RequestFailed => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest => "Invalid Request",
            ApiError::InvalidLookup => "Invalid request",
            ApiError::NotFound => "Not found",
            ApiError::RequestFailed => "Request failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "Error": self.message() }))).into_response()
    }
}
