use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone, Debug)]
enum Reply {
    Respond(ApiResponse),
    Unreachable,
}

/// In-memory Transport that answers from a script and records every request.
///
/// Used as the backend stand-in for tests. Unscripted routes answer 404.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    replies: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    calls: Arc<Mutex<Vec<ApiRequest>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        let response = ApiResponse {
            status,
            body: body.to_string().into_bytes(),
        };
        self.insert(method, path, Reply::Respond(response));
    }

    /// Fail `method path` as if the server were down.
    pub fn unreachable(&self, method: Method, path: &str) {
        self.insert(method, path, Reply::Unreachable);
    }

    fn insert(&self, method: Method, path: &str, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert((method, path.to_string()), reply);
        }
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded requests to `path`, any method.
    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.path == path).count()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.path.clone());
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(&key).cloned());
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Unreachable) => Err(TransportError::Unreachable(
                "connection refused".to_string(),
            )),
            None => Ok(ApiResponse {
                status: 404,
                body: br#"{"success": false, "message": "Not found"}"#.to_vec(),
            }),
        }
    }
}
