use libbrownfield_macros::similarity_feature;

use crate::{
  matching::{Feature, NEUTRAL, functions::compatibility, normalize},
  model::Site,
};

#[similarity_feature(FunctionSimilarity, name = "function")]
fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64 {
  function_similarity(lhs.land_use(), rhs.land_use())
}

/// Compatibility between two land-use categories.
///
/// Categories are compared case-insensitively against the fixed
/// compatibility table. Pairs involving a category the table does not know
/// are neutral.
pub fn function_similarity(lhs: &str, rhs: &str) -> f64 {
  compatibility(&normalize(lhs), &normalize(rhs)).unwrap_or(NEUTRAL)
}
