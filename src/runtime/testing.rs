//! Mock implementations for testing
//!
//! These mocks enable runtime testing without real I/O.

use crate::gate::{GateError, GateService, Verdict};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub context: Vec<String>,
    pub binding: Option<String>,
}

/// Mock gate that returns queued verdicts and records every request
pub struct MockGateService {
    responses: Mutex<VecDeque<Result<Verdict, GateError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockGateService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful verdict
    pub fn queue_verdict(&self, verdict: Verdict) {
        self.responses.lock().unwrap().push_back(Ok(verdict));
    }

    /// Queue a failed exchange
    pub fn queue_error(&self, error: GateError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Requests made so far
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockGateService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GateService for MockGateService {
    async fn query(&self, context: &[String], binding: Option<&str>) -> Result<Verdict, GateError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            context: context.to_vec(),
            binding: binding.map(ToString::to_string),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GateError::network("No mock response queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://gate"
    }
}
