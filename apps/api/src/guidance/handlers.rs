//! Axum route handlers for the Guidance API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::guidance::resolver::resolve_guidance;
use crate::models::query::Query;
use crate::session::submit::{into_payload, submit};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    pub problem_text: String,
    /// Present when the client wants stale-response suppression.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GuidanceResponse {
    pub query_id: Uuid,
    /// Markdown, passed through unmodified.
    pub text: String,
}

/// POST /api/v1/guidance
pub async fn handle_guidance(
    State(state): State<AppState>,
    Json(request): Json<GuidanceRequest>,
) -> Result<Json<GuidanceResponse>, AppError> {
    let query = Query::guidance(&request.problem_text)?;
    info!("Guidance query {} submitted", query.id());

    let outcome = submit(
        &state,
        request.session_id,
        &query,
        resolve_guidance(state.backend.as_ref(), query.text()),
    )
    .await?;

    let (text, _) = into_payload(outcome, &query)?;
    Ok(Json(GuidanceResponse {
        query_id: query.id(),
        text,
    }))
}
