//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use trigger_domain::error::TriggerError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`TriggerError`] to an HTTP response.
///
/// Not-found and validation failures keep `200 OK` with an `error` body, as
/// existing clients branch on the body rather than the status.
pub struct ApiError(TriggerError);

impl From<TriggerError> for ApiError {
    fn from(err: TriggerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TriggerError::Validation(err) => {
                tracing::debug!(?err, "rejected submission");
                (StatusCode::OK, err.to_string())
            }
            TriggerError::NotFound(err) => {
                tracing::debug!(id = %err.id, "record not found");
                (StatusCode::OK, err.to_string())
            }
            TriggerError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
