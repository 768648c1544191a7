use serde::Serialize;
use serde_json::Value;

use crate::model::{ComponentScores, ScoreResult};

#[derive(Serialize)]
pub struct RankedSite<'r> {
  pub id: &'r str,
  pub similarity_score: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub component_scores: Option<&'r ComponentScores>,
}

impl<'r> RankedSite<'r> {
  pub fn new(result: &'r ScoreResult, include_components: bool) -> RankedSite<'r> {
    RankedSite {
      id: &result.id,
      similarity_score: result.similarity_score,
      component_scores: include_components.then_some(&result.component_scores),
    }
  }
}

/// Shape ranked results for serialization.
///
/// The per-attribute breakdown is only kept when `include_components` is set.
pub fn ranked(results: &[ScoreResult], include_components: bool) -> Vec<RankedSite<'_>> {
  results.iter().map(|result| RankedSite::new(result, include_components)).collect()
}

pub fn to_json(results: &[ScoreResult], include_components: bool) -> serde_json::Result<Value> {
  serde_json::to_value(ranked(results, include_components))
}

pub fn to_json_string(results: &[ScoreResult], include_components: bool) -> serde_json::Result<String> {
  serde_json::to_string_pretty(&ranked(results, include_components))
}
