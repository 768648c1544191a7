mod references;
mod similarity;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::api::{AppState, errors::AppError};

pub(super) use self::references::get_reference;
pub use self::similarity::{similarity, similarity_with_weights};

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
  match state.engine.references().is_empty() {
    true => StatusCode::SERVICE_UNAVAILABLE,
    false => StatusCode::OK,
  }
}

pub async fn prometheus(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
  match state.prometheus {
    Some(handle) => Ok(handle.render()),
    None => Err(AppError::ResourceNotFound),
  }
}
