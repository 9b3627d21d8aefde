use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place link extracted from the backend's grounding metadata.
/// `uri` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub uri: String,
}

impl Reference {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The backend call did not complete (network, status, malformed body, timeout).
    TransportFailure,
    /// The backend answered but produced no text.
    EmptyAnswer,
    /// Local help was requested without a captured coordinate.
    LocationUnavailable,
}

/// Terminal (or pending) result of one query against the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    Pending,
    Success {
        text: String,
        references: Vec<Reference>,
        resolved_at: DateTime<Utc>,
    },
    Failure {
        reason: FailureReason,
        resolved_at: DateTime<Utc>,
    },
}

impl ResolutionOutcome {
    pub fn success(text: String, references: Vec<Reference>) -> Self {
        ResolutionOutcome::Success {
            text,
            references,
            resolved_at: Utc::now(),
        }
    }

    pub fn failure(reason: FailureReason) -> Self {
        ResolutionOutcome::Failure {
            reason,
            resolved_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResolutionOutcome::Pending)
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            ResolutionOutcome::Failure { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = ResolutionOutcome::success(
            "## Kya Problem Hai?".to_string(),
            vec![Reference::new("PS1", "u1")],
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["references"][0]["uri"], "u1");
        assert!(json.get("resolved_at").is_some());

        let pending = serde_json::to_value(ResolutionOutcome::Pending).unwrap();
        assert_eq!(pending["status"], "pending");
    }

    #[test]
    fn test_failure_reason_accessor() {
        let outcome = ResolutionOutcome::failure(FailureReason::EmptyAnswer);
        assert_eq!(outcome.failure_reason(), Some(FailureReason::EmptyAnswer));
        assert!(!outcome.is_pending());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["reason"], "empty_answer");
    }
}
