//! Handlers for `/datacenters/geojson` and `/datacenters/export/:format`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use rackmap_core::{
  export::{ExportFormat, feature_collection, serialize},
  store::{FacilityQuery, FacilityStore},
};

use crate::error::ApiError;

/// `GET /datacenters/geojson` — inline FeatureCollection for map clients.
pub async fn geojson<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let facilities = store
    .list_facilities(&FacilityQuery::default())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let collection = feature_collection(&facilities)
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(collection))
}

/// `GET /datacenters/export/:format` — file download in one of the three
/// supported encodings. Unknown formats are rejected with 400 before any
/// output is produced.
pub async fn download<S>(
  State(store): State<Arc<S>>,
  Path(format): Path<String>,
) -> Result<Response, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let format: ExportFormat = format
    .parse()
    .map_err(|e: rackmap_core::Error| ApiError::BadRequest(e.to_string()))?;

  let facilities = store
    .list_facilities(&FacilityQuery::default())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let export = serialize(&facilities, format)
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let headers = [
    (header::CONTENT_TYPE, export.content_type.to_owned()),
    (
      header::CONTENT_DISPOSITION,
      format!("attachment; filename={}", export.filename),
    ),
  ];
  Ok((headers, export.content).into_response())
}
