use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BrownfieldError {
  #[error("could not load site data: {0}")]
  DataLoadError(#[from] DataLoadError),
  #[error("site not found: {0}")]
  NotFoundError(String),
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

/// Why a site collection could not be read.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
  #[error("could not open {}", .path.display())]
  Open {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid site file {}", .path.display())]
  File {
    path: PathBuf,
    #[source]
    source: Box<DataLoadError>,
  },
  #[error("could not read header row")]
  Header(#[source] csv::Error),
  #[error("invalid record {line}")]
  Record {
    line: usize,
    #[source]
    source: csv::Error,
  },
  #[error("missing mandatory 'id' column")]
  MissingIdColumn,
  #[error("record {0} has an empty id")]
  EmptyId(usize),
}
