//! Axum route handlers for client sessions and location capture.

use axum::{
    extract::{Path, Query as QueryParams, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::outcome::ResolutionOutcome;
use crate::models::query::{Coordinate, LocationError, QueryKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

/// Either a coordinate or the reason the client's geolocation failed.
#[derive(Debug, Deserialize)]
pub struct LocationCaptureRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub error: Option<LocationError>,
}

#[derive(Debug, Serialize)]
pub struct LocationCaptureResponse {
    pub captured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<LocationError>,
    /// User-facing explanation when capture failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeParams {
    pub kind: QueryKind,
}

#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub query_id: Uuid,
    pub outcome: ResolutionOutcome,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(SessionCreatedResponse { session_id }))
}

/// POST /api/v1/sessions/:id/location
pub async fn handle_capture_location(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<LocationCaptureRequest>,
) -> Result<Json<LocationCaptureResponse>, AppError> {
    let location = match request {
        LocationCaptureRequest {
            error: Some(reason),
            latitude: None,
            longitude: None,
        } => Err(reason),
        LocationCaptureRequest {
            error: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        } => Ok(Coordinate::new(latitude, longitude)?),
        _ => {
            return Err(AppError::Validation(
                "provide either latitude and longitude, or error".to_string(),
            ))
        }
    };

    state.sessions.record_location(session_id, location)?;

    Ok(Json(match location {
        Ok(_) => LocationCaptureResponse {
            captured: true,
            reason: None,
            message: None,
        },
        Err(reason) => LocationCaptureResponse {
            captured: false,
            reason: Some(reason),
            message: Some(reason.user_message()),
        },
    }))
}

/// GET /api/v1/sessions/:id/outcome?kind=guidance|local_reference
///
/// Latest query of that kind and its outcome (possibly still pending).
pub async fn handle_get_outcome(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    QueryParams(params): QueryParams<OutcomeParams>,
) -> Result<Json<OutcomeResponse>, AppError> {
    let (query_id, outcome) = state
        .sessions
        .current(session_id, params.kind)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No {:?} query in session {session_id}",
                params.kind
            ))
        })?;

    Ok(Json(OutcomeResponse { query_id, outcome }))
}
