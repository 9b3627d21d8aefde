use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::outcome::FailureReason;
use crate::models::query::{QueryError, QueryKind};
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The resolution failures carry the message shown to the citizen; detail
/// stays in the server log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend call failed")]
    TransportFailure,

    #[error("Backend returned no answer for {0:?} query")]
    EmptyAnswer(QueryKind),

    #[error("Location has not been captured")]
    LocationUnavailable,

    #[error("Superseded: {0}")]
    Superseded(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn from_failure(reason: FailureReason, kind: QueryKind) -> Self {
        match reason {
            FailureReason::TransportFailure => AppError::TransportFailure,
            FailureReason::EmptyAnswer => AppError::EmptyAnswer(kind),
            FailureReason::LocationUnavailable => AppError::LocationUnavailable,
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::UnknownSession(_) => AppError::NotFound(e.to_string()),
            SessionError::LocationAlreadyCaptured(_) => AppError::Conflict(e.to_string()),
            SessionError::Superseded(_) => AppError::Superseded(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::TransportFailure => (
                StatusCode::BAD_GATEWAY,
                "TRANSPORT_FAILURE",
                "Kuch technical problem aa gayi hai. Kripya thodi der baad try karein.".to_string(),
            ),
            AppError::EmptyAnswer(QueryKind::Guidance) => (
                StatusCode::NOT_FOUND,
                "EMPTY_ANSWER",
                "Sorry, humein is problem ka solution nahi mil paya. Kripya dobara try karein."
                    .to_string(),
            ),
            AppError::EmptyAnswer(QueryKind::LocalReference) => (
                StatusCode::NOT_FOUND,
                "EMPTY_ANSWER",
                "Koi result nahi mila. Kripya thodi der baad try karein.".to_string(),
            ),
            AppError::LocationUnavailable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "LOCATION_UNAVAILABLE",
                "Pehle apni location set karein.".to_string(),
            ),
            AppError::Superseded(msg) => {
                tracing::warn!("Discarding stale result: {msg}");
                (StatusCode::CONFLICT, "SUPERSEDED", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_failure_reasons_map_to_statuses() {
        let cases = [
            (FailureReason::TransportFailure, StatusCode::BAD_GATEWAY),
            (FailureReason::EmptyAnswer, StatusCode::NOT_FOUND),
            (
                FailureReason::LocationUnavailable,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (reason, status) in cases {
            let response = AppError::from_failure(reason, QueryKind::Guidance).into_response();
            assert_eq!(response.status(), status, "{reason:?}");
        }
    }

    #[test]
    fn test_session_errors_map_to_statuses() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppError::from(SessionError::UnknownSession(id))
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(SessionError::Superseded(id))
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_query_error_is_validation() {
        let response = AppError::from(QueryError::EmptyText).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
