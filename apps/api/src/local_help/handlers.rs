//! Axum route handlers for the Local Help API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::local_help::prompts::QUICK_SEARCHES;
use crate::local_help::resolver::resolve_local_reference;
use crate::models::outcome::Reference;
use crate::models::query::{Coordinate, Query};
use crate::session::submit::{into_payload, submit};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocalHelpRequest {
    pub place_query: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// Overrides the session's captured coordinate when given.
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
}

#[derive(Debug, Serialize)]
pub struct LocalHelpResponse {
    pub query_id: Uuid,
    pub text: String,
    pub references: Vec<Reference>,
}

#[derive(Debug, Serialize)]
pub struct QuickSearchesResponse {
    pub quick_searches: Vec<&'static str>,
}

/// POST /api/v1/local-help
///
/// Uses the coordinate from the body, else the session's captured one.
/// With neither, responds LOCATION_UNAVAILABLE without calling the backend.
pub async fn handle_local_help(
    State(state): State<AppState>,
    Json(request): Json<LocalHelpRequest>,
) -> Result<Json<LocalHelpResponse>, AppError> {
    let coordinate = match (request.coordinate, request.session_id) {
        (Some(c), _) => Some(c),
        (None, Some(session_id)) => state.sessions.coordinate(session_id)?,
        (None, None) => None,
    };

    let query = Query::local_reference(&request.place_query, coordinate)?;
    info!("Local help query {} submitted", query.id());

    let outcome = submit(
        &state,
        request.session_id,
        &query,
        resolve_local_reference(state.backend.as_ref(), query.text(), query.coordinate()),
    )
    .await?;

    let (text, references) = into_payload(outcome, &query)?;
    Ok(Json(LocalHelpResponse {
        query_id: query.id(),
        text,
        references,
    }))
}

/// GET /api/v1/local-help/quick-searches
pub async fn handle_quick_searches() -> Json<QuickSearchesResponse> {
    Json(QuickSearchesResponse {
        quick_searches: QUICK_SEARCHES.to_vec(),
    })
}
