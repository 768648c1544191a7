use std::{borrow::Cow, error::Error};

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use libbrownfield::prelude::*;
use serde_json::json;
use tracing::*;
use validator::ValidationErrors;

pub(super) struct ApiError(pub StatusCode, pub String, pub Option<Vec<String>>);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("invalid credentials")]
  InvalidCredentials,
  #[error("missing resource")]
  ResourceNotFound,
  #[error("site not found: {0}")]
  SiteNotFound(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),

  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("could not load site data")]
  DataLoadError(#[source] DataLoadError),
  #[error("invalid weights: {0}")]
  InvalidWeights(String),

  #[error("invalid query parameter")]
  InvalidQuery(#[from] QueryRejection),
  #[error("invalid payload")]
  InvalidPayload(#[from] JsonRejection),
  #[error("request failed validation")]
  ValidationFailed(#[from] ValidationErrors),
}

impl From<BrownfieldError> for AppError {
  fn from(value: BrownfieldError) -> Self {
    match value {
      BrownfieldError::NotFoundError(id) => AppError::SiteNotFound(id),
      BrownfieldError::ConfigError(err) => AppError::InvalidWeights(err),
      BrownfieldError::DataLoadError(err) => AppError::DataLoadError(err),
      BrownfieldError::OtherError(err) => AppError::OtherError(err),
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    error!(error = self.source(), "{}", self.to_string());

    ApiError::from(&self).into_response()
  }
}

impl From<&AppError> for ApiError {
  fn from(value: &AppError) -> Self {
    match value {
      AppError::InvalidCredentials => ApiError(StatusCode::UNAUTHORIZED, value.to_string(), None),
      AppError::ResourceNotFound | AppError::SiteNotFound(_) => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::InvalidWeights(_) => ApiError(StatusCode::UNPROCESSABLE_ENTITY, value.to_string(), None),
      AppError::InvalidQuery(err) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), Some(vec![err.to_string()])),
      AppError::InvalidPayload(JsonRejection::MissingJsonContentType(_)) => ApiError(StatusCode::UNSUPPORTED_MEDIA_TYPE, "invalid media type, expected application/json".to_string(), None),
      AppError::InvalidPayload(err) => ApiError(StatusCode::BAD_REQUEST, value.to_string(), Some(vec![err.body_text()])),
      AppError::ValidationFailed(errs) => ApiError(StatusCode::UNPROCESSABLE_ENTITY, value.to_string(), Some(validation_messages(errs))),
      AppError::OtherError(inner) if inner.is::<AppError>() => match inner.downcast_ref::<AppError>() {
        Some(inner) => inner.into(),
        _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
      },
      _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let payload = match self.2 {
      Some(details) => json!({
          "message": self.1.to_string(),
          "details": details,
      }),
      None => json!({
          "message": self.1.to_string(),
      }),
    };

    (self.0, Json(payload)).into_response()
  }
}

fn validation_messages(errs: &ValidationErrors) -> Vec<String> {
  errs.field_errors().into_iter().flat_map(|(_, f)| f.clone()).filter_map(|f| f.message.map(Cow::into_owned)).collect()
}

#[cfg(test)]
mod tests {
  use axum::http::StatusCode;
  use libbrownfield::prelude::*;

  use super::{ApiError, AppError};

  #[test]
  fn engine_errors_map_to_statuses() {
    let cases = [
      (BrownfieldError::NotFoundError("bf_9".into()), StatusCode::NOT_FOUND),
      (BrownfieldError::ConfigError("missing weight for attribute 'density'".into()), StatusCode::UNPROCESSABLE_ENTITY),
      (BrownfieldError::DataLoadError(DataLoadError::MissingIdColumn), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (err, status) in cases {
      let ApiError(actual, ..) = ApiError::from(&AppError::from(err));

      assert_eq!(actual, status);
    }
  }

  #[test]
  fn context_errors_are_unwrapped() {
    let err = AppError::OtherError(anyhow::anyhow!("no authorization header found").context(AppError::InvalidCredentials));
    let ApiError(status, message, _) = ApiError::from(&err);

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message, "invalid credentials");
  }
}
