use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Transport, TransportError, TransportRequest, TransportResponse};

/// A scripted transport for tests: replays queued outcomes in order and records
/// every request. Only built for this crate's tests or with the `test-util` feature.
///
/// Once the queue is empty every further call fails as unreachable.
#[derive(Default)]
pub struct StubTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    sent: Mutex<Vec<TransportRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(TransportResponse {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, outcome: Result<TransportResponse, TransportError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    /// Requests seen so far, oldest first.
    pub fn sent(&self) -> Vec<TransportRequest> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last_sent(&self) -> Option<TransportRequest> {
        self.sent().pop()
    }
}

#[async_trait::async_trait]
impl Transport for StubTransport {
    fn get_name(&self) -> &str {
        "stub"
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let path = request.path.clone();
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(request);
        }
        let next = self.outcomes.lock().ok().and_then(|mut o| o.pop_front());
        next.unwrap_or_else(|| {
            Err(TransportError::Unreachable {
                path,
                reason: "no scripted response left".to_string(),
            })
        })
    }
}
