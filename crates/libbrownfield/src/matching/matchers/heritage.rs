use libbrownfield_macros::similarity_feature;

use crate::{
  matching::{Feature, NEUTRAL},
  model::Site,
};

#[similarity_feature(HeritageSimilarity, name = "heritage")]
fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64 {
  heritage_similarity(lhs.heritage(), rhs.heritage())
}

pub fn heritage_similarity(lhs: Option<bool>, rhs: Option<bool>) -> f64 {
  match (lhs, rhs) {
    (Some(lhs), Some(rhs)) if lhs == rhs => 1.0,
    (Some(_), Some(_)) => 0.4,
    _ => NEUTRAL,
  }
}

#[cfg(test)]
mod tests {
  use crate::{matching::Feature, model::Site};

  #[test]
  fn heritage_similarity() {
    assert_eq!(super::heritage_similarity(Some(true), Some(true)), 1.0);
    assert_eq!(super::heritage_similarity(Some(false), Some(false)), 1.0);
    assert_eq!(super::heritage_similarity(Some(true), Some(false)), 0.4);
    assert_eq!(super::heritage_similarity(None, Some(true)), 0.5);
    assert_eq!(super::heritage_similarity(None, Some(false)), 0.5);
    assert_eq!(super::heritage_similarity(Some(true), None), 0.5);
    assert_eq!(super::heritage_similarity(None, None), 0.5);
  }

  #[test]
  fn heritage_feature_reads_nested_flag() {
    let lhs = Site::builder("a").has_heritage(true).build();
    let rhs = Site::builder("b").properties(&[("has_heritage", serde_json::json!("yes"))]).build();

    assert_eq!(super::HeritageSimilarity.score_feature(&lhs, &rhs), 1.0);
  }
}
