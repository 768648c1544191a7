use axum::{
  body::Body,
  extract::MatchedPath,
  http::{HeaderName, HeaderValue, Request, StatusCode},
  middleware::Next,
  response::Response,
};
use metrics::{counter, histogram};
use opentelemetry::global;
use opentelemetry_http::HeaderExtractor;
use tokio::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

pub(crate) mod auth;
pub(crate) mod json;
pub(crate) mod logging;

pub(crate) static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Copy, Debug)]
pub(crate) struct RequestId(pub Uuid);

/// Tag each request with an ID, reusing the caller's `x-request-id` when it is
/// a valid UUID, and echo it back on the response.
pub(crate) async fn request_id(mut request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
  let request_id = request
    .headers()
    .get(&REQUEST_ID_HEADER)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| Uuid::parse_str(value).ok())
    .map(RequestId)
    .unwrap_or_else(|| RequestId(Uuid::new_v4()));

  request.extensions_mut().insert(request_id);

  let mut response = next.run(request).await;

  if let Ok(value) = HeaderValue::from_str(&request_id.0.to_string()) {
    response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
  }

  Ok(response)
}

pub(super) async fn metrics(request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
  let route = route(&request);
  let then = Instant::now();
  let response = next.run(request).await;

  counter!("http_requests_total", "route" => route.clone(), "status" => response.status().as_u16().to_string()).increment(1);
  histogram!("http_request_duration_seconds", "route" => route).record(then.elapsed().as_secs_f64());

  Ok(response)
}

pub(crate) fn create_request_span(req: &Request<Body>) -> Span {
  let parent = global::get_text_map_propagator(|propagator| propagator.extract(&HeaderExtractor(req.headers())));
  let request_id = req.extensions().get::<RequestId>().map(|id| id.0.to_string()).unwrap_or_default();
  let span = tracing::info_span!("request", %request_id, method = %req.method(), route = %route(req));

  let _ = span.set_parent(parent);
  span
}

/// Route template of the request, so metrics do not fan out per site ID.
fn route(req: &Request<Body>) -> String {
  req.extensions().get::<MatchedPath>().map(|path| path.as_str().to_string()).unwrap_or_else(|| "unmatched".to_string())
}
