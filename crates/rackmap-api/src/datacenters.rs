//! Handlers for `/datacenters` CRUD endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/datacenters` | Optional filters, see [`ListParams`] |
//! | `POST`   | `/datacenters` | Body: [`NewFacility`] JSON |
//! | `GET`    | `/datacenters/:id` | 404 if not found |
//! | `PUT`    | `/datacenters/:id` | Partial update; absent fields keep their values |
//! | `DELETE` | `/datacenters/:id` | 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rackmap_core::{
  facility::{Facility, FacilityStatus, NewFacility, OwnershipType},
  patch::{FacilityPatch, Patch},
  store::{FacilityQuery, FacilityStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Substring filter over name, operator, and city.
  pub text:      Option<String>,
  pub status:    Option<FacilityStatus>,
  pub ownership: Option<OwnershipType>,
  pub country:   Option<String>,
  /// Filter on the derived verified state.
  pub verified:  Option<bool>,
  pub limit:     Option<usize>,
  pub offset:    Option<usize>,
}

/// `GET /datacenters[?status=...][&ownership=...][&country=...][&text=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Facility>>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = FacilityQuery {
    text:      params.text,
    status:    params.status,
    ownership: params.ownership,
    country:   params.country,
    verified:  params.verified,
    limit:     params.limit,
    offset:    params.offset,
  };

  let facilities = store
    .list_facilities(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(facilities))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /datacenters` — body: [`NewFacility`] JSON
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewFacility>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Reject bad coordinates here so the client sees a 400, not a store
  // failure.
  rackmap_core::facility::validate_coordinates(body.latitude, body.longitude)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let facility = store
    .create_facility(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(facility)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /datacenters/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Facility>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let facility = store
    .get_facility(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("data center {id} not found")))?;
  Ok(Json(facility))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /datacenters/:id` — body: [`FacilityPatch`] JSON
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<FacilityPatch>,
) -> Result<Json<Facility>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Same contract as create: out-of-range coordinates are a 400, not a
  // store failure. Stored values are already valid, so only the patched
  // axes need checking.
  if let Patch::Set(latitude) = &patch.latitude {
    rackmap_core::facility::validate_latitude(*latitude)
      .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  }
  if let Patch::Set(longitude) = &patch.longitude {
    rackmap_core::facility::validate_longitude(*longitude)
      .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  }

  let facility = store
    .update_facility(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("data center {id} not found")))?;
  Ok(Json(facility))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /datacenters/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete_facility(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("data center {id} not found")))
  }
}
