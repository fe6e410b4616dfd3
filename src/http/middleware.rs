//! Axum middleware bracketing each request with add/remove tracking.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::tracking::registry::TrackingManager;
use crate::tracking::request::RequestContext;

/// RAII guard pairing `add_request` with `remove_request`.
///
/// The remove side runs on drop, so a panicking handler or a cancelled task
/// still closes out its registry entry.
pub struct RequestGuard {
    manager: Arc<TrackingManager>,
    request_id: String,
}

impl RequestGuard {
    pub fn new(
        manager: Arc<TrackingManager>,
        request_id: impl Into<String>,
        context: Arc<RequestContext>,
    ) -> Self {
        let request_id = request_id.into();
        manager.add_request(request_id.clone(), context);
        Self {
            manager,
            request_id,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.manager.remove_request(&self.request_id);
    }
}

/// Middleware function tracking every request through the manager.
///
/// Assigns a UUIDv4 request id and builds the request context from the peer
/// address and URI. Install with `middleware::from_fn_with_state` and serve
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub async fn track_requests(
    State(manager): State<Arc<TrackingManager>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let context = Arc::new(RequestContext::http(addr, request.uri().to_string()));

    let _guard = RequestGuard::new(manager, request_id, context);
    next.run(request).await
}
