use std::{collections::HashMap, sync::LazyLock};

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::error::BrownfieldError;

/// Attributes every weight configuration must cover, in scoring order.
pub const ATTRIBUTES: [&str; 6] = ["area", "function", "ownership", "heritage", "pollution", "density"];

pub const DEFAULT_WEIGHTS: [(&str, f64); 6] = [("area", 0.25), ("function", 0.30), ("ownership", 0.15), ("heritage", 0.10), ("pollution", 0.10), ("density", 0.10)];

pub(crate) static DEFAULT: LazyLock<Weights> = LazyLock::new(Weights::default);

/// Weight given to each attribute similarity when combining them.
///
/// Weights are meant to sum to 1.0 but this is not enforced: the total score
/// is a plain weighted sum, so unnormalized weights move it outside of
/// `[0, 1]`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Weights(HashMap<String, f64, RandomState>);

impl Default for Weights {
  fn default() -> Self {
    DEFAULT_WEIGHTS.into_iter().collect()
  }
}

impl Weights {
  /// Weight of `attribute`, failing if the configuration does not cover it.
  pub fn get(&self, attribute: &str) -> Result<f64, BrownfieldError> {
    self.0.get(attribute).copied().ok_or_else(|| BrownfieldError::ConfigError(format!("missing weight for attribute '{attribute}'")))
  }

  /// Return a copy of this configuration with `attribute` set to `weight`.
  pub fn with(&self, attribute: &str, weight: f64) -> Weights {
    let mut weights = self.clone();
    weights.0.insert(attribute.to_string(), weight);
    weights
  }

  pub fn sum(&self) -> f64 {
    ATTRIBUTES.iter().filter_map(|attribute| self.0.get(*attribute)).sum()
  }

  pub fn is_normalized(&self) -> bool {
    (self.sum() - 1.0).abs() < 1e-6
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
    self.0.iter().map(|(attribute, weight)| (attribute.as_str(), *weight))
  }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Weights {
  fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
    Weights(iter.into_iter().map(|(attribute, weight)| (attribute.into(), weight)).collect())
  }
}
