use axum::{
  Json,
  extract::{Path, State},
  response::{IntoResponse, Response},
};
use axum_extra::extract::{Query, WithRejection};
use libbrownfield::{output, prelude::*};
use metrics::histogram;
use tracing::instrument;
use validator::Validate;

use crate::api::{
  AppState,
  dto::{Payload, SimilarityParams},
  errors::AppError,
  middlewares::{auth::Auth, json::TypedJson, logging::RankingSummary},
};

#[instrument(skip_all, fields(reference_id = %id))]
pub async fn similarity(
  State(state): State<AppState>,
  _: Auth,
  Path(id): Path<String>,
  WithRejection(Query(params), _): WithRejection<Query<SimilarityParams>, AppError>,
) -> Result<Response, AppError> {
  rank(&state, &id, None, &params)
}

#[instrument(skip_all, fields(reference_id = %id))]
pub async fn similarity_with_weights(
  State(state): State<AppState>,
  _: Auth,
  Path(id): Path<String>,
  WithRejection(Query(params), _): WithRejection<Query<SimilarityParams>, AppError>,
  TypedJson(payload): TypedJson<Payload>,
) -> Result<Response, AppError> {
  rank(&state, &id, payload.weights.as_ref(), &params)
}

fn rank(state: &AppState, id: &str, weights: Option<&Weights>, params: &SimilarityParams) -> Result<Response, AppError> {
  params.validate()?;

  let results = state.engine.score(id, weights)?;
  let limit = params.limit.unwrap_or(results.len()).min(results.len());

  histogram!("brownfield_ranked_candidates").record(results.len() as f64);

  let summary = RankingSummary {
    reference_id: id.to_string(),
    candidates: results.len(),
    returned: limit,
  };

  let mut response = Json(output::ranked(&results[..limit], params.components)).into_response();

  response.extensions_mut().insert(summary);

  Ok(response)
}
