use axum::{
  Json,
  extract::{Path, State},
  response::IntoResponse,
};

use crate::api::{AppState, errors::AppError, middlewares::auth::Auth};

pub async fn get_reference(State(state): State<AppState>, _: Auth, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
  let site = state.engine.reference(&id)?;

  Ok(Json(site.clone()))
}
