use std::borrow::Cow;

use libbrownfield::prelude::*;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;
use validator::{Validate, ValidationError, ValidationErrors};

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SimilarityParams {
  #[serde_inline_default(false)]
  pub components: bool,
  #[validate(range(min = 1, message = "limit must be at least 1"))]
  pub limit: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct Payload {
  #[serde(default)]
  pub weights: Option<Weights>,
}

impl Validate for Payload {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let Some(weights) = &self.weights else {
      return Ok(());
    };

    let mut errors = ValidationErrors::new();

    for (attribute, weight) in weights.iter() {
      if !weight.is_finite() || weight < 0.0 {
        errors.add("weights", ValidationError::new("weight").with_message(Cow::Owned(format!("weight for '{attribute}' must be a non-negative number"))));
      }
    }

    match errors.is_empty() {
      true => Ok(()),
      false => Err(errors),
    }
  }
}

#[cfg(test)]
mod tests {
  use libbrownfield::prelude::*;
  use validator::Validate;

  use super::{Payload, SimilarityParams};

  #[test]
  fn payload_validation() {
    assert!(Payload::default().validate().is_ok());
    assert!(Payload { weights: Some(Weights::default()) }.validate().is_ok());

    let payload = Payload {
      weights: Some(Weights::default().with("area", -0.1)),
    };

    assert!(payload.validate().is_err());
  }

  #[test]
  fn params_validation() {
    assert!(SimilarityParams { components: false, limit: None }.validate().is_ok());
    assert!(SimilarityParams { components: true, limit: Some(3) }.validate().is_ok());
    assert!(SimilarityParams { components: false, limit: Some(0) }.validate().is_err());
  }
}
