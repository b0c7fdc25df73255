//! In-memory transport replaying scripted responses.

use crate::platform::ports::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport answering requests from a FIFO script.
///
/// Every request is recorded, so tests can assert on the exact wire calls an
/// adapter made. When the script runs dry the transport answers with
/// [`TransportError::Other`]. Clones share the script and the recording.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every reply, simulating a slow platform.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queues a response.
    pub fn push_response(&self, response: HttpResponse) {
        self.push(Ok(response));
    }

    /// Queues a JSON response with the given status.
    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(Ok(HttpResponse::json(status, body)));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.push(Err(error));
    }

    /// Returns every request sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    /// Returns how many requests were sent.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.requests.len())
    }

    /// Returns how many scripted replies remain unused.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.state.lock().map_or(0, |state| state.replies.len())
    }

    fn push(&self, reply: Result<HttpResponse, TransportError>) {
        if let Ok(mut state) = self.state.lock() {
            state.replies.push_back(reply);
        }
    }

    fn next_reply(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| TransportError::Other(err.to_string()))?;
        state.requests.push(request);
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response left".to_owned())))
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply(request)
    }
}
