use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::application::AppError;
use crate::storage::StoreError;

/// Maps domain errors to user-facing HTTP responses: validation failures
/// are the client's fault, everything else is an internal error.
pub(crate) struct ServerError(AppError);

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // A failed rollback leaves the transaction state uncertain; make
        // sure it reaches the log at error level before it goes on the wire.
        if let AppError::Store(err @ StoreError::RollbackFailed { .. }) = &self.0 {
            error!(%err, "rollback failed, transaction state uncertain");
        }

        let status = if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
