use std::net::SocketAddr;

use axum::{
  body::{Body, HttpBody},
  extract::ConnectInfo,
  http::{Request, StatusCode},
  middleware::Next,
  response::Response,
};
use jiff::Timestamp;
use tokio::time::Instant;

use crate::api::middlewares::RequestId;

/// Outcome of a ranking request, attached to the response for the access log.
#[derive(Clone, Debug)]
pub(crate) struct RankingSummary {
  pub reference_id: String,
  pub candidates: usize,
  pub returned: usize,
}

/// Emit one access log line per request.
pub async fn api_logger(request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
  let time = Timestamp::now();
  let method = request.method().clone();
  let uri = request.uri().clone();
  let request_id = request.extensions().get::<RequestId>().map(|id| id.0.to_string());
  let remote = request.extensions().get::<ConnectInfo<SocketAddr>>().map(|ConnectInfo(addr)| addr.ip().to_string());

  let then = Instant::now();
  let response = next.run(request).await;
  let summary = response.extensions().get::<RankingSummary>();

  tracing::info!(
    time = %time.strftime("%Y-%m-%dT%H:%M:%S%z"),
    request_id = request_id.as_deref(),
    remote = remote.as_deref().unwrap_or("-"),
    method = %method,
    path = uri.path(),
    status = response.status().as_u16(),
    latency_ms = then.elapsed().as_millis(),
    size = response.size_hint().exact().unwrap_or(0),
    reference_id = summary.map(|summary| summary.reference_id.as_str()),
    candidates = summary.map(|summary| summary.candidates),
    returned = summary.map(|summary| summary.returned),
    "{} {}",
    method,
    uri,
  );

  Ok(response)
}
