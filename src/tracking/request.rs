//! Tracked request value types.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Caller-owned context for a tracked request.
///
/// The registry holds a reference to this handle, never ownership. The two
/// optional fields are what the built-in log listeners report; embedders that
/// track non-HTTP work can leave both empty.
#[derive(Debug, Default)]
pub struct RequestContext {
    /// Remote peer address, when known.
    pub remote_addr: Option<SocketAddr>,

    /// Requested URI, when known.
    pub uri: Option<String>,
}

impl RequestContext {
    /// Context for an HTTP request with a known peer and URI.
    pub fn http(remote_addr: SocketAddr, uri: impl Into<String>) -> Self {
        Self {
            remote_addr: Some(remote_addr),
            uri: Some(uri.into()),
        }
    }
}

/// A single in-flight request under observation.
///
/// Immutable once created; discarded when the request is removed from the
/// registry. Uses `tokio::time::Instant` so tests can drive the clock.
#[derive(Debug, Clone)]
pub struct TrackedRequest {
    request_id: String,
    context: Arc<RequestContext>,
    started_at: Instant,
}

impl TrackedRequest {
    pub fn new(request_id: impl Into<String>, context: Arc<RequestContext>) -> Self {
        Self {
            request_id: request_id.into(),
            context,
            started_at: Instant::now(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn context(&self) -> &Arc<RequestContext> {
        &self.context
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Time this request has been open so far.
    pub fn running_time(&self) -> Duration {
        Instant::now().saturating_duration_since(self.started_at)
    }

    /// Time this request has been open so far, in milliseconds.
    pub fn running_millis(&self) -> u64 {
        self.running_time().as_millis() as u64
    }
}
