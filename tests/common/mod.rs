// tests/common/mod.rs
// Shared stub transport: canned JSON per path, call recording, and an
// optional fail-everything mode for fallback tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use cryptofolio_news::error::TransportError;
use cryptofolio_news::transport::Transport;

#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, Value>>,
    fail_unrouted: bool,
    pub calls: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub posts: Mutex<Vec<(String, Value)>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unrouted paths return a 500 instead of an empty envelope.
    pub fn failing() -> Self {
        Self {
            fail_unrouted: true,
            ..Self::default()
        }
    }

    pub fn route(&self, path: &str, v: Value) {
        self.routes.lock().unwrap().insert(path.to_string(), v);
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded GET requests with their query parameters.
    pub fn get_queries(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(path.to_string());
        self.queries
            .lock()
            .unwrap()
            .push((path.to_string(), params.to_vec()));
        if let Some(v) = self.routes.lock().unwrap().get(path) {
            return Ok(v.clone());
        }
        if self.fail_unrouted {
            return Err(TransportError::Status {
                status: 500,
                message: "stub failure".into(),
            });
        }
        Ok(serde_json::json!({ "items": [] }))
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.posts.lock().unwrap().push((path.to_string(), body));
        Ok(Value::Null)
    }
}
