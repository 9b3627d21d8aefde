//! Recording backend for resolver and route tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GatewayError, GenerationBackend, GenerationRequest, GenerationResult, GroundingEntry};

pub enum MockReply {
    Result(GenerationResult),
    ApiError(u16),
}

/// Replays queued replies in order and records every request it receives.
/// When the queue runs dry it answers with a plain text result.
#[derive(Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self::new().then_text(text, vec![])
    }

    pub fn then_text(self, text: &str, grounding: Vec<GroundingEntry>) -> Self {
        self.push(MockReply::Result(GenerationResult {
            text: Some(text.to_string()),
            grounding,
        }))
    }

    pub fn then_no_text(self, grounding: Vec<GroundingEntry>) -> Self {
        self.push(MockReply::Result(GenerationResult {
            text: None,
            grounding,
        }))
    }

    pub fn then_api_error(self, status: u16) -> Self {
        self.push(MockReply::ApiError(status))
    }

    fn push(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Result(result)) => Ok(result),
            Some(MockReply::ApiError(status)) => Err(GatewayError::Api {
                status,
                message: "mock failure".to_string(),
            }),
            None => Ok(GenerationResult {
                text: Some("mock answer".to_string()),
                grounding: vec![],
            }),
        }
    }
}
