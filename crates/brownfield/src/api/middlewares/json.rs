use axum::{
  Json,
  extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::errors::AppError;

/// JSON body extractor that also runs the payload's validation rules.
pub struct TypedJson<T>(pub T);

impl<T, S> FromRequest<S> for TypedJson<T>
where
  T: DeserializeOwned + Validate,
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(payload) = Json::<T>::from_request(request, state).await?;

    payload.validate()?;

    Ok(TypedJson(payload))
  }
}
