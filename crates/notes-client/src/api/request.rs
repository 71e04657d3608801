use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

/// One outbound call: where, how, what, and whether the session token
/// goes along.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub endpoint: String,
    /// Caller-supplied values appended after `endpoint`, each
    /// percent-encoded as one path segment.
    pub segments: Vec<String>,
    pub method: Method,
    pub body: Option<Value>,
    pub requires_auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            segments: Vec::new(),
            method,
            body: None,
            requires_auth: false,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json<B: Serialize>(self, body: &B) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(self.body(value))
    }

    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}
