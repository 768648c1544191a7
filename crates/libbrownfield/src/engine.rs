use std::{io::Read, path::Path};

use crate::{
  error::BrownfieldError,
  loader,
  model::{ScoreResult, Site},
  scoring,
  weights::{DEFAULT, Weights},
};

/// Ranks candidate brownfield sites by similarity to a reference site.
///
/// The engine holds two immutable collections: the reference sites that can be
/// queried, and the candidate sites they are compared against. Scoring never
/// mutates them, so an engine can be shared across threads and queried
/// concurrently.
///
/// # Examples
///
/// ```rust
/// use libbrownfield::prelude::*;
///
/// let references = "id,area_m2,current_use\nbf_0,10000,commercial\n";
/// let candidates = "id,area_m2,current_use\nintl_1,1000000,retail\nintl_2,10000,commercial\n";
///
/// let engine = SimilarityEngine::from_readers(references.as_bytes(), candidates.as_bytes()).unwrap();
/// let results = engine.score("bf_0", None).unwrap();
///
/// assert_eq!(results[0].id, "intl_2");
/// assert_eq!(results[1].component_scores.get("function"), Some(0.8));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimilarityEngine {
  references: Vec<Site>,
  candidates: Vec<Site>,
}

impl SimilarityEngine {
  pub fn new(references: Vec<Site>, candidates: Vec<Site>) -> SimilarityEngine {
    crate::init();

    SimilarityEngine { references, candidates }
  }

  /// Load both collections from CSV files.
  pub fn from_paths(references: impl AsRef<Path>, candidates: impl AsRef<Path>) -> Result<SimilarityEngine, BrownfieldError> {
    Ok(SimilarityEngine::new(loader::load_sites_from_path(references)?, loader::load_sites_from_path(candidates)?))
  }

  /// Load both collections from CSV readers.
  pub fn from_readers<R: Read, C: Read>(references: R, candidates: C) -> Result<SimilarityEngine, BrownfieldError> {
    Ok(SimilarityEngine::new(loader::load_sites(references)?, loader::load_sites(candidates)?))
  }

  pub fn references(&self) -> &[Site] {
    &self.references
  }

  pub fn candidates(&self) -> &[Site] {
    &self.candidates
  }

  /// Find a reference site from its ID.
  ///
  /// When several reference sites share the ID, the first one is returned
  /// and the duplication is logged.
  pub fn reference(&self, id: &str) -> Result<&Site, BrownfieldError> {
    let mut matches = self.references.iter().filter(|site| site.id == id);

    let Some(site) = matches.next() else {
      return Err(BrownfieldError::NotFoundError(id.to_string()));
    };

    let duplicates = matches.count();

    if duplicates > 0 {
      tracing::warn!(reference_id = id, duplicates, "reference id is not unique, using the first match");
    }

    Ok(site)
  }

  /// Rank all candidates by similarity to the reference site `reference_id`.
  ///
  /// Uses the default weights unless `weights` is given. The weights are not
  /// validated up front: a configuration missing an attribute fails when that
  /// attribute is combined.
  pub fn score(&self, reference_id: &str, weights: Option<&Weights>) -> Result<Vec<ScoreResult>, BrownfieldError> {
    let reference = self.reference(reference_id)?;

    scoring::score(reference, &self.candidates, weights.unwrap_or(&DEFAULT))
  }
}
