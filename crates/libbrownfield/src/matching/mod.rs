mod matchers;

use crate::{error::BrownfieldError, model::Site, weights::Weights};

pub(crate) mod functions;

pub use self::functions::CATEGORIES;

pub use self::matchers::{
  area::area_similarity,
  density::{DENSITY_METRICS, density_similarity},
  function::function_similarity,
  heritage::heritage_similarity,
  ownership::ownership_similarity,
  pollution::pollution_similarity,
};

use self::matchers::{
  area::AreaSimilarity, density::DensitySimilarity, function::FunctionSimilarity, heritage::HeritageSimilarity, ownership::OwnershipSimilarity, pollution::PollutionSimilarity,
};

/// Score given when an attribute cannot be compared.
pub const NEUTRAL: f64 = 0.5;

pub(crate) trait Feature: Send + Sync {
  fn name(&self) -> &'static str;
  fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64;
}

pub(crate) const FEATURES: &[&dyn Feature] = &[&AreaSimilarity, &FunctionSimilarity, &OwnershipSimilarity, &HeritageSimilarity, &PollutionSimilarity, &DensitySimilarity];

/// Compute every attribute similarity between two sites and combine them.
///
/// Each feature score is pushed to `results` as it is computed. The weight
/// for a feature is looked up only once its score is known, so a weight
/// configuration lacking an attribute fails there.
pub(crate) fn run_features(lhs: &Site, rhs: &Site, weights: &Weights, results: &mut Vec<(&'static str, f64)>) -> Result<f64, BrownfieldError> {
  FEATURES.iter().try_fold(0.0, |score, func| {
    let feature_score = func.score_feature(lhs, rhs);

    results.push((func.name(), feature_score));

    tracing::debug!(feature = func.name(), score = feature_score, "computed feature score");

    Ok(score + (feature_score * weights.get(func.name())?))
  })
}

pub(crate) fn normalize(value: &str) -> String {
  value.trim().to_lowercase()
}
