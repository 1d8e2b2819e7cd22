use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Transport, TransportError, TransportRequest, TransportResponse};

type Outcome = Result<TransportResponse, TransportError>;

/// A mock transport for testing. Replays canned outcomes in order and
/// records every request it receives.
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    history: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            outcomes: VecDeque::new(),
        }
    }

    /// Requests received so far, oldest first.
    pub fn history(&self) -> Vec<TransportRequest> {
        self.history
            .lock()
            .expect("history lock poisoned")
            .clone()
    }

    /// Body of the most recent request, parsed as JSON.
    pub fn last_body(&self) -> serde_json::Value {
        let history = self.history();
        let last = history.last().expect("at least one request was sent");
        serde_json::from_str(&last.body).expect("request body is JSON")
    }

    pub fn last_path(&self) -> String {
        let history = self.history();
        let last = history.last().expect("at least one request was sent");
        last.url.path().to_owned()
    }
}

pub struct MockTransportBuilder {
    outcomes: VecDeque<Outcome>,
}

impl MockTransportBuilder {
    pub fn with_response(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.outcomes.push_back(Ok(TransportResponse {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn with_failure(mut self, err: TransportError) -> Self {
        self.outcomes.push_back(Err(err));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            outcomes: Mutex::new(self.outcomes),
            history: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.history
            .lock()
            .expect("history lock poisoned")
            .push(request);
        self.outcomes
            .lock()
            .expect("outcome lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("mock transport has no queued outcome")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn request() -> TransportRequest {
        TransportRequest {
            url: Url::parse("http://127.0.0.1:8332/").expect("static url"),
            body: "{}".to_owned(),
            auth: None,
        }
    }

    #[tokio::test]
    async fn replays_outcomes_in_order_then_fails() {
        let mock = MockTransport::builder()
            .with_response(StatusCode::OK, "first")
            .with_failure(TransportError::new("second"))
            .build();

        let first = mock.post(request()).await.expect("first is a response");
        assert_eq!(first.body, "first");
        let second = mock.post(request()).await.expect_err("second is a failure");
        assert_eq!(second.message, "second");
        assert!(mock.post(request()).await.is_err());
        assert_eq!(mock.history().len(), 3);
    }
}
