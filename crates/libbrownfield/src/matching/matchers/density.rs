use libbrownfield_macros::similarity_feature;

use crate::{
  matching::{Feature, NEUTRAL},
  model::{Properties, Site},
};

/// Nested attributes holding comparable density metrics.
pub const DENSITY_METRICS: [&str; 3] = ["residential_density_per_ha", "employee_density_per_ha", "building_density_fsi"];

#[similarity_feature(DensitySimilarity, name = "density")]
fn score_feature(&self, lhs: &Site, rhs: &Site) -> f64 {
  match density_similarity(&lhs.properties, &rhs.properties) {
    Some(score) => score,

    None => {
      tracing::trace!("no comparable density metric, using neutral score");

      NEUTRAL
    }
  }
}

/// Average `min / max` ratio over the density metrics both sites carry.
///
/// Only strictly positive, finite values take part. Returns `None` when no
/// metric can be compared, in which case the attribute does not apply.
pub fn density_similarity(lhs: &Properties, rhs: &Properties) -> Option<f64> {
  let ratios = DENSITY_METRICS
    .iter()
    .filter_map(|key| {
      let (lhs, rhs) = (lhs.number(key)?, rhs.number(key)?);

      if !lhs.is_finite() || !rhs.is_finite() || lhs <= 0.0 || rhs <= 0.0 {
        return None;
      }

      Some(lhs.min(rhs) / lhs.max(rhs))
    })
    .collect::<Vec<_>>();

  match ratios.is_empty() {
    true => None,
    false => Some(ratios.iter().sum::<f64>() / ratios.len() as f64),
  }
}
