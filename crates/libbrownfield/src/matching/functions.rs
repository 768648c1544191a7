use std::{collections::HashMap, sync::LazyLock};

use ahash::RandomState;
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "./assets"]
struct Assets;

type CompatibilityTable = HashMap<String, HashMap<String, f64, RandomState>, RandomState>;

/// Land-use categories known to the compatibility table.
pub const CATEGORIES: [&str; 6] = ["mixed_use", "commercial", "residential", "industrial", "retail", ""];

pub(crate) static FUNCTIONS: LazyLock<CompatibilityTable> = LazyLock::new(|| {
  tracing::debug!("building land-use compatibility table");

  let file = Assets::get("functions.yml").expect("could not read land-use compatibility table");

  serde_yaml::from_slice::<CompatibilityTable>(&file.data).expect("could not unmarshal land-use compatibility table")
});

/// Compatibility between two normalized land-use categories, if both are known.
pub(crate) fn compatibility(lhs: &str, rhs: &str) -> Option<f64> {
  FUNCTIONS
    .get(lhs)
    .and_then(|row| row.get(rhs))
    .or_else(|| FUNCTIONS.get(rhs).and_then(|row| row.get(lhs)))
    .copied()
}

#[cfg(test)]
mod tests {
  use super::{CATEGORIES, FUNCTIONS, compatibility};

  #[test]
  fn table_covers_categories() {
    assert_eq!(FUNCTIONS.len(), CATEGORIES.len());

    for lhs in CATEGORIES {
      for rhs in CATEGORIES {
        assert!(FUNCTIONS[lhs].contains_key(rhs), "missing {lhs} -> {rhs}");
      }
    }
  }

  #[test]
  fn table_is_symmetric() {
    for lhs in CATEGORIES {
      for rhs in CATEGORIES {
        assert_eq!(FUNCTIONS[lhs][rhs], FUNCTIONS[rhs][lhs], "{lhs} / {rhs}");
      }
    }
  }

  #[test]
  fn unknown_categories() {
    assert_eq!(compatibility("commercial", "retail"), Some(0.8));
    assert_eq!(compatibility("", "industrial"), Some(0.3));
    assert_eq!(compatibility("commercial", "park"), None);
    assert_eq!(compatibility("park", "park"), None);
  }
}
