mod error;
mod matching;
mod model;

pub mod engine;
pub mod loader;
pub mod output;
pub mod scoring;
pub mod weights;

/// Initialize the data structures used for scoring.
///
/// They are built lazily on first use otherwise; calling this up front moves
/// that cost out of the first query.
pub fn init() {
  std::sync::LazyLock::force(&crate::matching::functions::FUNCTIONS);
}

pub mod prelude {
  pub use crate::engine::SimilarityEngine;
  pub use crate::error::{BrownfieldError, DataLoadError};
  pub use crate::matching::{
    CATEGORIES, DENSITY_METRICS, NEUTRAL, area_similarity, density_similarity, function_similarity, heritage_similarity, ownership_similarity, pollution_similarity,
  };
  pub use crate::model::{ComponentScores, Properties, ScoreResult, Site};
  pub use crate::output::RankedSite;
  pub use crate::weights::{ATTRIBUTES, DEFAULT_WEIGHTS, Weights};
}
