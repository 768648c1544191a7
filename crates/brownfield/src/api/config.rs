use std::{
  env::{self, VarError},
  fmt::Display,
  path::PathBuf,
  str::FromStr,
  time::Duration,
};

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,
  pub api_key: Option<String>,
  pub request_timeout: Duration,

  // Site data
  pub reference_sites: PathBuf,
  pub candidate_sites: PathBuf,

  // Debugging
  pub enable_tracing: bool,
  pub trace_sample_ratio: f64,
  pub enable_prometheus: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      api_key: None,
      request_timeout: Duration::from_secs(10),
      reference_sites: PathBuf::from("data/reference_sites.csv"),
      candidate_sites: PathBuf::from("data/candidate_sites.csv"),
      enable_tracing: false,
      trace_sample_ratio: 0.1,
      enable_prometheus: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let defaults = Config::default();

    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
      api_key: env::var("API_KEY").ok().filter(|key| !key.is_empty()),
      request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT", defaults.request_timeout.as_secs())?),
      reference_sites: parse_env("REFERENCE_SITES", defaults.reference_sites)?,
      candidate_sites: parse_env("CANDIDATE_SITES", defaults.candidate_sites)?,
      enable_tracing: env::var("ENABLE_TRACING").unwrap_or_default() == "1",
      trace_sample_ratio: parse_env("OTEL_TRACES_SAMPLER_ARGS", defaults.trace_sample_ratio)?,
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    };

    if config.request_timeout.is_zero() {
      return Err(AppError::ConfigError("REQUEST_TIMEOUT must be greater than zero".into()));
    }

    if !(0.0..=1.0).contains(&config.trace_sample_ratio) {
      return Err(AppError::ConfigError("OTEL_TRACES_SAMPLER_ARGS must be between 0 and 1".into()));
    }

    Ok(config)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}"))),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}"))),
    },
  }
}
