use axum::{http::StatusCode, response::IntoResponse};
use mapnotes_schema::StoreResponse;
use thiserror::Error as ThisError;
use tracing::error;

use super::StorageError;
use crate::server::respond::legacy_json;

/// Request-scoped failures, all reported to the caller as `{success:false, msg}`.
#[derive(Debug, ThisError)]
pub enum NoteError {
    #[error("Invalid field '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("No such backend : {0}")]
    BackendNotFound(String),

    #[error("Unable to store note: {0}")]
    Storage(#[from] StorageError),
}

impl NoteError {
    pub fn status(&self) -> StatusCode {
        match self {
            NoteError::Validation { .. } => StatusCode::BAD_REQUEST,
            NoteError::BackendNotFound(_) => StatusCode::NOT_FOUND,
            NoteError::Storage(e) if e.is_pool_timeout() => StatusCode::SERVICE_UNAVAILABLE,
            NoteError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if let NoteError::Storage(cause) = &self {
            error!(error = %cause, "Note storage failed");
        }
        legacy_json(status, &StoreResponse::failed(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_backend() {
        let err = NoteError::BackendNotFound("missing".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "No such backend : missing");
    }

    #[test]
    fn pool_timeout_maps_to_service_unavailable() {
        let err = NoteError::from(StorageError::from(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = NoteError::from(StorageError::from(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
