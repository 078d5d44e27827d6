//! Trace-context propagation onto outbound requests.

use axum::http::HeaderMap;
use reqwest::RequestBuilder;

/// Correlation header carried end to end.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Decorates an outbound middletier request with context taken from the
/// inbound request headers.
///
/// Which implementation is injected depends on the deployment: traced
/// variants forward correlation headers, the plain variant does nothing.
pub trait RequestDecorator: Send + Sync {
    fn decorate(&self, inbound: &HeaderMap, outbound: RequestBuilder) -> RequestBuilder;
}

/// Forwards the inbound `x-request-id` header, so middletier log lines can
/// be correlated with edge log lines.
pub struct RequestIdPropagator;

impl RequestDecorator for RequestIdPropagator {
    fn decorate(&self, inbound: &HeaderMap, outbound: RequestBuilder) -> RequestBuilder {
        match inbound.get(X_REQUEST_ID) {
            Some(id) => outbound.header(X_REQUEST_ID, id.clone()),
            None => outbound,
        }
    }
}

/// Leaves outbound requests untouched.
pub struct NoopDecorator;

impl RequestDecorator for NoopDecorator {
    fn decorate(&self, _inbound: &HeaderMap, outbound: RequestBuilder) -> RequestBuilder {
        outbound
    }
}
