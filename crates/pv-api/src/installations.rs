//! Handlers for `/installations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/installations` | Body: [`NewInstallation`]; returns 201 + id |
//! | `GET`  | `/installations/:id` | 404 if not found |
//! | `POST` | `/installations/:id/deactivate` | Idempotent; returns 200 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::{StatusCode, header},
  response::IntoResponse,
};
use pv_core::{
  installation::{NewInstallation, PvInstallation},
  log::NewInstallationLog,
  store::InstallationStore,
};

use crate::error::ApiError;

/// Load installation `id` or fail with 404.
pub(crate) async fn require<S>(store: &S, id: i64) -> Result<PvInstallation, ApiError>
where
  S: InstallationStore,
{
  store
    .get_installation(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::installation_not_found(id))
}

/// `201 Created` with a `Location` header and the new id as the body.
pub(crate) fn created(location: String, id: i64) -> impl IntoResponse {
  (StatusCode::CREATED, [(header::LOCATION, location)], Json(id))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /installations`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewInstallation>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InstallationStore,
{
  let Json(input) = body?;
  input.validate()?;

  // The store appends the create entry in the same transaction.
  let installation = store
    .insert_installation(input)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = installation.id, "installation registered");
  Ok(created(format!("/installations/{}", installation.id), installation.id))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /installations/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PvInstallation>, ApiError>
where
  S: InstallationStore,
{
  let Path(id) = path?;
  Ok(Json(require(store.as_ref(), id).await?))
}

// ─── Deactivate ───────────────────────────────────────────────────────────────

/// `POST /installations/:id/deactivate`
///
/// Deactivating an inactive installation succeeds and still records an
/// audit entry.
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: InstallationStore,
{
  let Path(id) = path?;
  let mut installation = require(store.as_ref(), id).await?;
  let was_active = installation.deactivate();

  store
    .update_installation(installation, NewInstallationLog::deactivated(id, was_active))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id, was_active, "installation deactivated");
  Ok(StatusCode::OK)
}
