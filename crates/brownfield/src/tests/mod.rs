use std::sync::Arc;

use libbrownfield::prelude::*;

use crate::api::{AppState, config::Config};

mod log_writer;
mod middlewares;

pub(crate) fn engine() -> SimilarityEngine {
  SimilarityEngine::new(
    vec![Site::builder("bf_0").area_m2(10_000.0).function("commercial").ownership("public").has_heritage(true).has_pollution(true).build()],
    vec![
      Site::builder("same").area_m2(10_000.0).function("commercial").ownership("public").has_heritage(true).has_pollution(true).build(),
      Site::builder("far").area_m2(1_000_000.0).function("retail").ownership("private").has_heritage(false).has_pollution(false).build(),
      Site::builder("unknown").build(),
    ],
  )
}

pub(crate) fn state(config: Config, engine: SimilarityEngine) -> AppState {
  AppState {
    config,
    prometheus: None,
    engine: Arc::new(engine),
  }
}
