use libbrownfield_macros::similarity_feature;

use crate::{
  matching::{Feature, NEUTRAL, normalize},
  model::Site,
};

#[similarity_feature(OwnershipSimilarity, name = "ownership")]
fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64 {
  ownership_similarity(lhs.ownership(), rhs.ownership())
}

pub fn ownership_similarity(lhs: &str, rhs: &str) -> f64 {
  let (lhs, rhs) = (normalize(lhs), normalize(rhs));

  if lhs == rhs {
    return 1.0;
  }

  if lhs.is_empty() || rhs.is_empty() {
    return NEUTRAL;
  }

  match lhs == "mixed" || rhs == "mixed" {
    true => 0.7,
    false => 0.3,
  }
}
