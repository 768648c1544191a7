use anyhow::Context;
use axum::{
  RequestPartsExt,
  extract::{FromRef, FromRequestParts},
  http::request::Parts,
};
use axum_extra::{
  TypedHeader,
  headers::{Authorization, authorization::Bearer},
};

use crate::api::{AppState, errors::AppError};

/// Requires a matching bearer token when an API key is configured.
#[non_exhaustive]
pub(crate) struct Auth;

impl<S> FromRequestParts<S> for Auth
where
  S: Send + Sync,
  AppState: FromRef<S>,
{
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let app_state = AppState::from_ref(state);

    let Some(api_key) = app_state.config.api_key.as_deref() else {
      return Ok(Auth);
    };

    let header = parts
      .extract::<TypedHeader<Authorization<Bearer>>>()
      .await
      .context("no authorization header found")
      .context(AppError::InvalidCredentials)?;

    if header.token() != api_key {
      return Err(AppError::InvalidCredentials);
    }

    Ok(Auth)
  }
}
