use std::sync::Arc;

use axum::{Router, http::StatusCode, middleware, routing::get};
use libbrownfield::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{api::config::Config, trace};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub engine: Arc<SimilarityEngine>,
}

pub fn routes(config: &Config, engine: SimilarityEngine) -> anyhow::Result<Router> {
  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    engine: Arc::new(engine),
  };

  Ok(router(state))
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/references/{id}", get(handlers::get_reference))
    .route("/similarity/{id}", get(handlers::similarity).post(handlers::similarity_with_weights))
    .fallback(handlers::not_found)
    .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.request_timeout))
    .layer(middleware::from_fn(middlewares::metrics))
    .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
    // The routes below will not go through the observability middlewares above
    .route("/healthz", get(handlers::healthz))
    .route("/readyz", get(handlers::readyz))
    .route("/metrics", get(handlers::prometheus))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}
