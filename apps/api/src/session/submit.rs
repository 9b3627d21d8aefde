//! The single submission path used by the resolver handlers.
//!
//! The query value is passed in directly; nothing is read back from shared
//! "current input" state. Timeouts are imposed here because the backend
//! client defines none.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::outcome::{FailureReason, Reference, ResolutionOutcome};
use crate::models::query::Query;
use crate::session::{SessionError, SessionStore};
use crate::state::AppState;

/// Runs `resolution` for `query`, bounded by the configured timeout.
///
/// With a session, the query becomes that session's current query first and
/// the outcome is only returned if no newer query replaced it meanwhile;
/// otherwise the caller gets `AppError::Superseded`. If this future is dropped
/// mid-flight (client disconnect), the query is closed as a transport failure.
pub async fn submit<F>(
    state: &AppState,
    session_id: Option<Uuid>,
    query: &Query,
    resolution: F,
) -> Result<ResolutionOutcome, AppError>
where
    F: Future<Output = ResolutionOutcome>,
{
    let guard = match session_id {
        Some(id) => {
            state.sessions.begin(id, query)?;
            Some(InFlight {
                sessions: &state.sessions,
                session_id: id,
                query,
                settled: false,
            })
        }
        None => None,
    };

    let limit = Duration::from_secs(state.config.request_timeout_secs);
    let outcome = match tokio::time::timeout(limit, resolution).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(
                "Query {} timed out after {}s",
                query.id(),
                limit.as_secs()
            );
            ResolutionOutcome::failure(FailureReason::TransportFailure)
        }
    };

    if let Some(reason) = outcome.failure_reason() {
        info!("Query {} resolved with failure: {reason:?}", query.id());
    }

    if let Some(guard) = guard {
        guard.settle(outcome.clone())?;
    }

    Ok(outcome)
}

/// A session query that has begun but not yet been completed.
struct InFlight<'a> {
    sessions: &'a SessionStore,
    session_id: Uuid,
    query: &'a Query,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, outcome: ResolutionOutcome) -> Result<(), SessionError> {
        self.settled = true;
        self.sessions.complete(self.session_id, self.query, outcome)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("Query {} abandoned before resolving", self.query.id());
        // superseded or expired sessions have nothing left to close
        let _ = self.sessions.complete(
            self.session_id,
            self.query,
            ResolutionOutcome::failure(FailureReason::TransportFailure),
        );
    }
}

/// Splits a terminal outcome into the success payload or the user-facing error.
pub fn into_payload(
    outcome: ResolutionOutcome,
    query: &Query,
) -> Result<(String, Vec<Reference>), AppError> {
    match outcome {
        ResolutionOutcome::Success {
            text, references, ..
        } => Ok((text, references)),
        ResolutionOutcome::Failure { reason, .. } => {
            Err(AppError::from_failure(reason, query.kind()))
        }
        ResolutionOutcome::Pending => Err(AppError::Internal(anyhow::anyhow!(
            "resolver returned a pending outcome for query {}",
            query.id()
        ))),
    }
}
