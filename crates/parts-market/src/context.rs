//! Request-scoped context passed explicitly to every handler.

use std::fmt;
use std::time::Instant;

/// Unique request identifier for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Reuse an ID supplied by the caller (e.g. an `x-request-id` header).
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request context. Created at the boundary, dropped with the response.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    started: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::with_id(RequestId::generate())
    }

    pub fn with_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            started: Instant::now(),
        }
    }

    /// Milliseconds since the request entered the system.
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
