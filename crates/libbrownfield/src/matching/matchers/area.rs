use libbrownfield_macros::similarity_feature;

use crate::{
  matching::{Feature, NEUTRAL},
  model::Site,
};

#[similarity_feature(AreaSimilarity, name = "area")]
fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64 {
  area_similarity(lhs.area(), rhs.area())
}

/// Compare two site areas by order of magnitude.
///
/// The score decays exponentially with the distance between the base-10
/// logarithms of both areas: equal areas score 1.0 and areas one decade apart
/// score `exp(-1)`. Missing, non-positive or non-finite areas are neutral.
pub fn area_similarity(lhs: Option<f64>, rhs: Option<f64>) -> f64 {
  let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
    return NEUTRAL;
  };

  if !lhs.is_finite() || !rhs.is_finite() || lhs <= 0.0 || rhs <= 0.0 {
    return NEUTRAL;
  }

  let log_ratio = (lhs.log10() - rhs.log10()).abs();

  (-log_ratio).exp()
}

#[cfg(test)]
mod tests {
  use float_cmp::approx_eq;

  use crate::{matching::Feature, model::Site};

  #[test]
  fn area_similarity() {
    assert_eq!(super::area_similarity(Some(10_000.0), Some(10_000.0)), 1.0);
    assert!(approx_eq!(f64, super::area_similarity(Some(10_000.0), Some(1_000_000.0)), (-2.0f64).exp(), epsilon = 1e-12));
    assert!(approx_eq!(f64, super::area_similarity(Some(10_000.0), Some(100_000.0)), (-1.0f64).exp(), epsilon = 1e-12));
  }

  #[test]
  fn area_similarity_is_symmetric_and_reflexive() {
    let areas = [0.5, 1.0, 37.0, 1_234.5, 10_000.0, 98_765.4, 2_500_000.0];

    for lhs in areas {
      assert_eq!(super::area_similarity(Some(lhs), Some(lhs)), 1.0);

      for rhs in areas {
        let score = super::area_similarity(Some(lhs), Some(rhs));

        assert_eq!(score, super::area_similarity(Some(rhs), Some(lhs)));
        assert!((0.0..=1.0).contains(&score));
      }
    }
  }

  #[test]
  fn unknown_areas_are_neutral() {
    assert_eq!(super::area_similarity(None, Some(10.0)), 0.5);
    assert_eq!(super::area_similarity(Some(10.0), None), 0.5);
    assert_eq!(super::area_similarity(Some(0.0), Some(10.0)), 0.5);
    assert_eq!(super::area_similarity(Some(-5.0), Some(10.0)), 0.5);
    assert_eq!(super::area_similarity(Some(f64::NAN), Some(10.0)), 0.5);
  }

  #[test]
  fn area_feature_uses_nested_fallback() {
    let lhs = Site::builder("a").area_m2(10_000.0).build();
    let rhs = Site::builder("b").properties(&[("area", serde_json::json!(1_000_000))]).build();

    assert!(approx_eq!(f64, super::AreaSimilarity.score_feature(&lhs, &rhs), 0.135, epsilon = 0.001));
  }
}
