//! Stale-response suppression for one resolver within one session.
//!
//! Every submission becomes the current query. An outcome is applied only if
//! it belongs to the current query and that query is still pending, so a slow
//! answer to an older submission can never replace a newer one, and a query's
//! outcome is set at most once.

use uuid::Uuid;

use crate::models::outcome::ResolutionOutcome;
use crate::models::query::Query;

#[derive(Debug, Default)]
pub struct QueryTracker {
    current: Option<(Uuid, ResolutionOutcome)>,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `query` the current one and marks it pending.
    pub fn begin(&mut self, query: &Query) {
        self.current = Some((query.id(), ResolutionOutcome::Pending));
    }

    /// Applies `outcome` to `query_id`. Returns `false` (and discards the
    /// outcome) if the query is no longer current or already resolved.
    pub fn complete(&mut self, query_id: Uuid, outcome: ResolutionOutcome) -> bool {
        match &mut self.current {
            Some((current_id, slot)) if *current_id == query_id && slot.is_pending() => {
                *slot = outcome;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&(Uuid, ResolutionOutcome)> {
        self.current.as_ref()
    }
}
