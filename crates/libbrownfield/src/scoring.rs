use std::time::Instant;

use itertools::Itertools;
use metrics::histogram;
use tracing::instrument;

use crate::{
  error::BrownfieldError,
  matching::{FEATURES, run_features},
  model::{ComponentScores, ScoreResult, Site, round3},
  weights::Weights,
};

/// Score every candidate against the reference site and rank them.
///
/// Results are sorted by descending rounded score. The sort is stable, so
/// candidates with equal scores keep their original relative order.
#[instrument(name = "compute_scores", skip_all, fields(reference_id = reference.id, candidates = candidates.len()))]
pub fn score(reference: &Site, candidates: &[Site], weights: &Weights) -> Result<Vec<ScoreResult>, BrownfieldError> {
  let then = Instant::now();

  if !weights.is_normalized() {
    tracing::warn!(sum = weights.sum(), "attribute weights do not sum to 1.0, scores may fall outside of [0, 1]");
  }

  let mut results = Vec::with_capacity(candidates.len());

  for candidate in candidates {
    results.push(score_candidate(reference, candidate, weights)?);
  }

  histogram!("brownfield_scoring_latency_seconds").record(then.elapsed().as_secs_f64());

  Ok(results.into_iter().sorted_by(|lhs, rhs| rhs.similarity_score.total_cmp(&lhs.similarity_score)).collect())
}

fn score_candidate(reference: &Site, candidate: &Site, weights: &Weights) -> Result<ScoreResult, BrownfieldError> {
  let mut features = Vec::with_capacity(FEATURES.len());
  let score = round3(run_features(reference, candidate, weights, &mut features)?);

  tracing::debug!(site_id = candidate.id, score = score, "computed score");

  histogram!("brownfield_scoring_scores").record(score);

  Ok(ScoreResult {
    id: candidate.id.clone(),
    similarity_score: score,
    component_scores: ComponentScores(features.into_iter().map(|(name, score)| (name, round3(score))).collect()),
  })
}
