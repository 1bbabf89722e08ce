//! HTTP middleware for the fleet query service.
//!
//! - [`RequestId`]: correlation ID taken from `X-Request-ID` or generated as a UUID v7
//! - [`MetricsLayer`]: Tower layer that records HTTP metrics and opens a
//!   `request` span around each call
//!
//! When the caller sends no `X-Request-ID`, the layer writes the generated ID
//! into the request headers so handlers log the same value.
//!
//! Metrics recorded:
//! - `http_requests_total`: Counter by method, path, status bucket
//! - `http_request_duration_seconds`: Histogram by method, path
//! - `http_request_size_bytes` / `http_response_size_bytes`: Histograms by method, path

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Create a new request ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the request ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Header carrying the correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extract the request ID from headers or generate a new UUID v7.
///
/// Empty or non-UTF-8 header values are treated as missing.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Collapse a request path into a low-cardinality metric label.
///
/// Query strings are dropped and the free-form segments of the `/vehicles`
/// routes (colors, brands, years) are replaced by their parameter names.
pub fn normalize_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = path.split('/').collect();

    let normalized: Vec<&str> = match segments.as_slice() {
        ["", "vehicles", "color", _, "year", _] => {
            vec!["", "vehicles", "color", ":color", "year", ":year"]
        }
        ["", "vehicles", "brand", _, "between", _, _] => {
            vec!["", "vehicles", "brand", ":brand", "between", ":start_year", ":end_year"]
        }
        ["", "vehicles", "average_speed", "brand", _] => {
            vec!["", "vehicles", "average_speed", "brand", ":brand"]
        }
        ["", "vehicles", "average_capacity", "brand", _] => {
            vec!["", "vehicles", "average_capacity", "brand", ":brand"]
        }
        _ => return path.to_string(),
    };
    normalized.join("/")
}

/// Parse a `Content-Length` header, if present and numeric.
fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Convert HTTP status code to bucket label.
///
/// Groups status codes into buckets: "2xx", "3xx", "4xx", "5xx".
fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

// =============================================================================
// MetricsLayer - Tower middleware for HTTP metrics
// =============================================================================

/// Tower layer for recording HTTP metrics.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

/// Middleware service that records HTTP metrics.
#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = normalize_path(req.uri().path());

        if let Some(size) = content_length(req.headers()) {
            metrics::histogram!(
                "http_request_size_bytes",
                "method" => method.clone(),
                "path" => path.clone()
            )
            .record(size);
        }

        let request_id = extract_or_generate_request_id(req.headers());
        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            req.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        let remote_addr = req
            .extensions()
            .get::<std::net::SocketAddr>()
            .map(|a| a.to_string());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = remote_addr.as_deref().unwrap_or("-"),
        );

        {
            let _enter = span.enter();
            tracing::info!("handling request");
        }

        let future = self.inner.call(req);

        MetricsFuture {
            inner: future,
            start,
            method,
            path,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Future wrapper that records metrics on completion.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let latency = this.start.elapsed();
        let status = result.as_ref().ok().map(|response| response.status().as_u16());
        // A service error never produced a response; count it as a server failure.
        let status_label = status.map_or("5xx", status_bucket);

        metrics::counter!(
            "http_requests_total",
            "method" => this.method.clone(),
            "path" => this.path.clone(),
            "status" => status_label
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "path" => this.path.clone()
        )
        .record(latency.as_secs_f64());

        match &result {
            Ok(response) => {
                if let Some(size) = content_length(response.headers()) {
                    metrics::histogram!(
                        "http_response_size_bytes",
                        "method" => this.method.clone(),
                        "path" => this.path.clone()
                    )
                    .record(size);
                }
                tracing::info!(
                    status = status.unwrap_or_default(),
                    latency_ms = latency.as_secs_f64() * 1000.0,
                    "request completed"
                );
            }
            Err(_) => {
                tracing::error!(
                    latency_ms = latency.as_secs_f64() * 1000.0,
                    "request failed"
                );
            }
        }

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();

        // UUIDs should be unique
        assert_ne!(id1, id2);

        // Should be valid UUID format (36 chars with hyphens)
        assert_eq!(id1.as_str().len(), 36);
        assert!(id1.as_str().contains('-'));
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("test-123"));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str(), "test-123");
    }

    #[test]
    fn test_extract_request_id_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("test-456"));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str(), "test-456");
    }

    #[test]
    fn test_extract_request_id_generates_when_missing() {
        let headers = HeaderMap::new();
        let id = extract_or_generate_request_id(&headers);

        // Should be a valid UUID
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_extract_request_id_generates_when_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static(""));

        let id = extract_or_generate_request_id(&headers);

        // Should generate a new ID since header is empty
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/vehicles/color/Red/year/2010"),
            "/vehicles/color/:color/year/:year"
        );
        assert_eq!(
            normalize_path("/vehicles/brand/Ford/between/2010/2012"),
            "/vehicles/brand/:brand/between/:start_year/:end_year"
        );
        assert_eq!(
            normalize_path("/vehicles/average_speed/brand/Fiat"),
            "/vehicles/average_speed/brand/:brand"
        );
        assert_eq!(
            normalize_path("/vehicles/average_capacity/brand/Fiat"),
            "/vehicles/average_capacity/brand/:brand"
        );
        assert_eq!(
            normalize_path("/vehicles/weight?weight_min=1000"),
            "/vehicles/weight"
        );
        assert_eq!(normalize_path("/health/ready"), "/health/ready");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(201), "2xx");
        assert_eq!(status_bucket(204), "2xx");
        assert_eq!(status_bucket(301), "3xx");
        assert_eq!(status_bucket(404), "4xx");
        assert_eq!(status_bucket(422), "4xx");
        assert_eq!(status_bucket(500), "5xx");
        assert_eq!(status_bucket(503), "5xx");
    }
}
