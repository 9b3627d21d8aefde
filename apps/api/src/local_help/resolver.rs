//! Local-Reference resolver: place query + coordinate → maps-grounded answer
//! plus a deduplicated list of place links.

use tracing::{info, warn};

use crate::llm_client::{GenerationBackend, GenerationRequest, Grounding, LOCAL_HELP_MODEL};
use crate::local_help::prompts::build_local_help_prompt;
use crate::local_help::references::collect_references;
use crate::models::outcome::{FailureReason, ResolutionOutcome};
use crate::models::query::Coordinate;

/// Resolves one place query near `coordinate`.
///
/// Callers are expected to block submission until a coordinate exists; a
/// missing one still yields `LocationUnavailable` without touching the
/// backend. Otherwise exactly one backend call is made, with maps grounding.
pub async fn resolve_local_reference(
    backend: &dyn GenerationBackend,
    place_query: &str,
    coordinate: Option<Coordinate>,
) -> ResolutionOutcome {
    let Some(coordinate) = coordinate else {
        warn!("Local help requested without a captured location");
        return ResolutionOutcome::failure(FailureReason::LocationUnavailable);
    };

    let request = GenerationRequest {
        model: LOCAL_HELP_MODEL,
        prompt: build_local_help_prompt(place_query),
        grounding: Grounding::Maps(coordinate),
    };

    match backend.generate(&request).await {
        Ok(result) => match result.text {
            Some(text) => {
                let raw_count = result.grounding.len();
                let references = collect_references(result.grounding);
                info!(
                    "Local help resolved: {} references ({} raw grounding entries)",
                    references.len(),
                    raw_count
                );
                ResolutionOutcome::success(text, references)
            }
            None => {
                warn!("Local help backend returned no text");
                ResolutionOutcome::failure(FailureReason::EmptyAnswer)
            }
        },
        Err(e) => {
            warn!("Local help backend call failed: {e}");
            ResolutionOutcome::failure(FailureReason::TransportFailure)
        }
    }
}
