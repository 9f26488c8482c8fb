//! The `FacilityStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `rackmap-store-sqlite`).
//! Higher layers (`rackmap-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  facility::{Facility, FacilityStatus, NewFacility, OwnershipType},
  patch::FacilityPatch,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`FacilityStore::list_facilities`].
///
/// All filters are conjunctive. Grouping and filtering keys are matched
/// verbatim (case-sensitive); no normalization occurs.
#[derive(Debug, Clone, Default)]
pub struct FacilityQuery {
  /// Substring filter over name, operator, and city.
  pub text:      Option<String>,
  pub status:    Option<FacilityStatus>,
  pub ownership: Option<OwnershipType>,
  pub country:   Option<String>,
  /// Filter on the derived verified state (every source verified; zero
  /// sources counts as verified).
  pub verified:  Option<bool>,
  pub limit:     Option<usize>,
  pub offset:    Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a facility catalog backend.
///
/// The store owns identity and timestamps: `id` is assigned at creation and
/// `last_updated` is refreshed on every mutation. Deleting a facility
/// cascades to its sources.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FacilityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new facility. Rejects out-of-range coordinates.
  fn create_facility(
    &self,
    input: NewFacility,
  ) -> impl Future<Output = Result<Facility, Self::Error>> + Send + '_;

  /// Retrieve a facility by id, sources included. Returns `None` if not
  /// found.
  fn get_facility(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Facility>, Self::Error>> + Send + '_;

  /// List facilities matching `query`, ordered by name.
  fn list_facilities<'a>(
    &'a self,
    query: &'a FacilityQuery,
  ) -> impl Future<Output = Result<Vec<Facility>, Self::Error>> + Send + 'a;

  /// Apply a partial update. Absent patch fields retain their prior values;
  /// a present `sources` field replaces the whole source list. Refreshes
  /// `last_updated`. Returns `None` if the facility does not exist.
  fn update_facility(
    &self,
    id: Uuid,
    patch: FacilityPatch,
  ) -> impl Future<Output = Result<Option<Facility>, Self::Error>> + Send + '_;

  /// Delete a facility and its sources. Returns `false` if it did not
  /// exist.
  fn delete_facility(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
