#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, ApiTransport, Method};
use crate::ClientError;

type Reply = Result<ApiResponse, ClientError>;

/// Scripted transport for tests.
///
/// Replies are queued per method and path and consumed in order; the last
/// reply of a route is repeated for every further request. Requests to a
/// route with no script fail with `TransportFailure`. Every request is
/// recorded, including its query and form.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<(Method, String), VecDeque<Reply>>>>,
    pub requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for `method path`.
    pub fn on(&self, method: Method, path: &str, reply: ApiResponse) -> &Self {
        self.push(method, path, Ok(reply))
    }

    /// Queues a 200 JSON reply.
    pub fn on_json(&self, method: Method, path: &str, body: Value) -> &Self {
        self.on(method, path, ApiResponse::ok_json(body))
    }

    /// Queues a reply with the given status and plain body.
    pub fn on_status(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.on(method, path, ApiResponse::new(status, body))
    }

    /// Queues a network-level failure.
    pub fn on_error(&self, method: Method, path: &str, message: &str) -> &Self {
        self.push(
            method,
            path,
            Err(ClientError::TransportFailure(message.to_owned())),
        )
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(reply);
        self
    }

    /// All requests sent so far.
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests sent to `method path`.
    pub fn sent_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.sent()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let reply = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        drop(routes);

        reply.unwrap_or_else(|| {
            Err(ClientError::TransportFailure(format!(
                "no scripted reply for {} {}",
                key.0, key.1
            )))
        })
    }
}
