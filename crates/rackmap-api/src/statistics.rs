//! Handler for `GET /statistics`.

use std::sync::Arc;

use axum::{Json, extract::State};
use rackmap_core::{
  stats::{Statistics, compute_statistics},
  store::{FacilityQuery, FacilityStore},
};

use crate::error::ApiError;

/// `GET /statistics` — summary statistics over the whole catalog.
///
/// One read against the store, then a pure in-memory aggregation; an empty
/// catalog yields all-zero statistics, never an error.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Statistics>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let facilities = store
    .list_facilities(&FacilityQuery::default())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(compute_statistics(&facilities)))
}
