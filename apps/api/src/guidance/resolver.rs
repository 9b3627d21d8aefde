//! Guidance resolver: free-text problem → fixed-section markdown guidance.
//!
//! The markdown structure is requested in the prompt but not validated here;
//! the returned text is passed through as-is.

use tracing::{info, warn};

use crate::guidance::prompts::build_guidance_prompt;
use crate::llm_client::{GenerationBackend, GenerationRequest, Grounding, GUIDANCE_MODEL};
use crate::models::outcome::{FailureReason, ResolutionOutcome};

/// Resolves one problem description. Issues exactly one backend call with
/// grounding disabled. Never returns `Pending`.
pub async fn resolve_guidance(
    backend: &dyn GenerationBackend,
    problem_text: &str,
) -> ResolutionOutcome {
    let request = GenerationRequest {
        model: GUIDANCE_MODEL,
        prompt: build_guidance_prompt(problem_text),
        grounding: Grounding::Disabled,
    };

    match backend.generate(&request).await {
        Ok(result) => match result.text {
            Some(text) => {
                info!("Guidance resolved ({} chars)", text.len());
                ResolutionOutcome::success(text, Vec::new())
            }
            None => {
                warn!("Guidance backend returned no text");
                ResolutionOutcome::failure(FailureReason::EmptyAnswer)
            }
        },
        Err(e) => {
            warn!("Guidance backend call failed: {e}");
            ResolutionOutcome::failure(FailureReason::TransportFailure)
        }
    }
}
