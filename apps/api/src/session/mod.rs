//! In-memory client sessions: the captured coordinate plus one query tracker
//! per resolver. Nothing here outlives the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::outcome::ResolutionOutcome;
use crate::models::query::{Coordinate, LocationError, Query, QueryKind};

pub mod handlers;
pub mod submit;
pub mod tracker;

use tracker::QueryTracker;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Session {0} not found")]
    UnknownSession(Uuid),

    #[error("Location is already captured for session {0}")]
    LocationAlreadyCaptured(Uuid),

    #[error("Query {0} was superseded by a newer query")]
    Superseded(Uuid),
}

/// What the client's geolocation reported for this session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    NotRequested,
    Captured(Coordinate),
    Failed(LocationError),
}

#[derive(Debug)]
struct Session {
    location: LocationState,
    guidance: QueryTracker,
    local_reference: QueryTracker,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            location: LocationState::NotRequested,
            guidance: QueryTracker::new(),
            local_reference: QueryTracker::new(),
            last_seen: now,
        }
    }

    fn tracker(&mut self, kind: QueryKind) -> &mut QueryTracker {
        match kind {
            QueryKind::Guidance => &mut self.guidance,
            QueryKind::LocalReference => &mut self.local_reference,
        }
    }
}

/// Shared session table. Cloning shares the table.
///
/// Every access refreshes a session; one left idle for longer than
/// `idle_ttl` is treated as unknown and removed. The lock is never held
/// across an `.await`.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        // a panic while holding the lock cannot leave a session half-updated
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_expired(&self, session: &Session, now: Instant) -> bool {
        now.saturating_duration_since(session.last_seen) > self.idle_ttl
    }

    /// Runs `f` on a live session and marks it as seen.
    fn with_session<T>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let now = Instant::now();
        let mut sessions = self.lock();

        let expired = match sessions.get(&session_id) {
            Some(session) => self.is_expired(session, now),
            None => return Err(SessionError::UnknownSession(session_id)),
        };
        if expired {
            sessions.remove(&session_id);
            info!("Session {session_id} expired");
            return Err(SessionError::UnknownSession(session_id));
        }

        let session = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::UnknownSession(session_id))?;
        session.last_seen = now;
        f(session)
    }

    /// Creates a session, sweeping out idle ones first.
    pub fn create(&self) -> Uuid {
        let now = Instant::now();
        let id = Uuid::new_v4();

        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {evicted} idle sessions");
        }
        sessions.insert(id, Session::new(now));
        drop(sessions);

        info!("Session {id} created");
        id
    }

    /// Records the geolocation result. A captured coordinate is immutable;
    /// a failed attempt may be retried.
    pub fn record_location(
        &self,
        session_id: Uuid,
        location: Result<Coordinate, LocationError>,
    ) -> Result<(), SessionError> {
        self.with_session(session_id, |session| {
            if matches!(session.location, LocationState::Captured(_)) {
                return Err(SessionError::LocationAlreadyCaptured(session_id));
            }

            session.location = match location {
                Ok(coordinate) => {
                    info!("Session {session_id}: location captured");
                    LocationState::Captured(coordinate)
                }
                Err(reason) => {
                    warn!("Session {session_id}: location unavailable ({reason:?})");
                    LocationState::Failed(reason)
                }
            };
            Ok(())
        })
    }

    pub fn location(&self, session_id: Uuid) -> Result<LocationState, SessionError> {
        self.with_session(session_id, |session| Ok(session.location))
    }

    pub fn coordinate(&self, session_id: Uuid) -> Result<Option<Coordinate>, SessionError> {
        Ok(match self.location(session_id)? {
            LocationState::Captured(c) => Some(c),
            _ => None,
        })
    }

    pub fn begin(&self, session_id: Uuid, query: &Query) -> Result<(), SessionError> {
        self.with_session(session_id, |session| {
            session.tracker(query.kind()).begin(query);
            Ok(())
        })
    }

    /// Applies the outcome if `query` is still the session's current query of its kind.
    pub fn complete(
        &self,
        session_id: Uuid,
        query: &Query,
        outcome: ResolutionOutcome,
    ) -> Result<(), SessionError> {
        self.with_session(session_id, |session| {
            if session.tracker(query.kind()).complete(query.id(), outcome) {
                Ok(())
            } else {
                Err(SessionError::Superseded(query.id()))
            }
        })
    }

    pub fn current(
        &self,
        session_id: Uuid,
        kind: QueryKind,
    ) -> Result<Option<(Uuid, ResolutionOutcome)>, SessionError> {
        self.with_session(session_id, |session| {
            Ok(session.tracker(kind).current().cloned())
        })
    }
}
