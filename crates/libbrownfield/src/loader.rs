use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{
  error::{BrownfieldError, DataLoadError},
  model::{Properties, Site, coerce_bool},
};

#[derive(Debug, Deserialize)]
struct SiteRow {
  id: String,
  #[serde(default)]
  area_m2: Option<String>,
  #[serde(default)]
  function: Option<String>,
  #[serde(default)]
  current_use: Option<String>,
  #[serde(default)]
  ownership: Option<String>,
  #[serde(default)]
  has_heritage: Option<String>,
  #[serde(default)]
  has_pollution: Option<String>,
  #[serde(default)]
  environmental_burden: Option<String>,
  #[serde(default, alias = "properties")]
  properties_for_similarity_calc: Option<String>,
}

impl From<SiteRow> for Site {
  fn from(row: SiteRow) -> Self {
    let area_m2 = row.area_m2.as_deref().and_then(|area| parse_number(&row.id, "area_m2", area));
    let has_heritage = row.has_heritage.as_deref().and_then(|flag| parse_flag(&row.id, "has_heritage", flag));
    let has_pollution = row.has_pollution.as_deref().and_then(|flag| parse_flag(&row.id, "has_pollution", flag));
    let properties = row.properties_for_similarity_calc.as_deref().map(Properties::parse).unwrap_or_default();

    Site {
      id: row.id,
      area_m2,
      function: row.function,
      current_use: row.current_use,
      ownership: row.ownership,
      has_heritage,
      has_pollution,
      environmental_burden: row.environmental_burden,
      properties,
    }
  }
}

/// Read sites from CSV data with a header row.
///
/// An `id` column is mandatory, other columns are optional and unknown ones
/// are ignored. Cells that cannot be interpreted (numbers, flags, attribute
/// blobs) are treated as unknown values rather than failing the load.
pub fn load_sites<R: Read>(reader: R) -> Result<Vec<Site>, BrownfieldError> {
  let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

  let headers = reader.headers().map_err(DataLoadError::Header)?;

  if !headers.iter().any(|header| header == "id") {
    return Err(DataLoadError::MissingIdColumn.into());
  }

  let mut sites = Vec::new();

  for (line, row) in reader.deserialize::<SiteRow>().enumerate() {
    let row = row.map_err(|source| DataLoadError::Record { line: line + 1, source })?;

    if row.id.trim().is_empty() {
      return Err(DataLoadError::EmptyId(line + 1).into());
    }

    sites.push(Site::from(row));
  }

  tracing::debug!(count = sites.len(), "parsed site records");

  Ok(sites)
}

pub fn load_sites_from_path(path: impl AsRef<Path>) -> Result<Vec<Site>, BrownfieldError> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|source| DataLoadError::Open { path: path.to_path_buf(), source })?;

  let sites = load_sites(file).map_err(|err| match err {
    BrownfieldError::DataLoadError(source) => BrownfieldError::DataLoadError(DataLoadError::File {
      path: path.to_path_buf(),
      source: Box::new(source),
    }),
    err => err,
  })?;

  tracing::info!(path = %path.display(), count = sites.len(), "loaded sites");

  Ok(sites)
}

fn parse_number(id: &str, column: &str, value: &str) -> Option<f64> {
  let value = value.trim();

  if value.is_empty() {
    return None;
  }

  match value.parse::<f64>() {
    Ok(number) => Some(number),

    Err(err) => {
      tracing::debug!(site_id = id, column, error = %err, "could not parse number, treating as unknown");

      None
    }
  }
}

fn parse_flag(id: &str, column: &str, value: &str) -> Option<bool> {
  if value.trim().is_empty() {
    return None;
  }

  let flag = coerce_bool(value);

  if flag.is_none() {
    tracing::debug!(site_id = id, column, value, "could not parse flag, treating as unknown");
  }

  flag
}
