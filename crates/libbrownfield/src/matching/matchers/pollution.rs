use libbrownfield_macros::similarity_feature;

use crate::{
  matching::{Feature, NEUTRAL},
  model::Site,
};

#[similarity_feature(PollutionSimilarity, name = "pollution")]
fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64 {
  pollution_similarity((lhs.pollution(), lhs.environmental_burden()), (rhs.pollution(), rhs.environmental_burden()))
}

/// Compare the environmental contamination of two sites.
///
/// Each side is a pollution flag and a free-text burden description. Known
/// flags on both sides decide on their own. Otherwise, two documented burdens
/// are treated as commensurable whatever they describe.
pub fn pollution_similarity((lhs_flag, lhs_burden): (Option<bool>, Option<&str>), (rhs_flag, rhs_burden): (Option<bool>, Option<&str>)) -> f64 {
  if let (Some(lhs), Some(rhs)) = (lhs_flag, rhs_flag) {
    return match lhs == rhs {
      true => 1.0,
      false => 0.4,
    };
  }

  let documented = |burden: Option<&str>| burden.is_some_and(|b| !b.trim().is_empty());

  match (documented(lhs_burden), documented(rhs_burden)) {
    (true, true) => 1.0,
    (true, false) | (false, true) => NEUTRAL,
    (false, false) => NEUTRAL,
  }
}
