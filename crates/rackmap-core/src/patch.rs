//! Partial-update payloads with explicit present/absent markers.
//!
//! A PUT body only changes the fields it actually carries. [`Patch`] makes
//! that contract explicit in the type: a missing JSON field deserializes to
//! `Absent`, a present field (including an explicit `null` for nullable
//! targets) deserializes to `Set`.

use serde::{Deserialize, Deserializer};

use crate::facility::{
  Capacity, Facility, FacilityStatus, Metadata, OwnershipType, Source,
};

// ─── Patch<T> ────────────────────────────────────────────────────────────────

/// A field of an update payload: either left untouched or set to a value.
///
/// For nullable targets, use `Patch<Option<T>>`: `Set(None)` clears the
/// field, `Absent` keeps whatever was there.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
  #[default]
  Absent,
  Set(T),
}

impl<T> Patch<T> {
  pub fn is_absent(&self) -> bool {
    matches!(self, Self::Absent)
  }

  /// Overwrite `slot` if this patch carries a value.
  pub fn apply_to(self, slot: &mut T) {
    if let Self::Set(value) = self {
      *slot = value;
    }
  }
}

// A present field of any shape becomes `Set`; absence is handled by
// `#[serde(default)]` on the containing struct.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    T::deserialize(deserializer).map(Patch::Set)
  }
}

// ─── FacilityPatch ───────────────────────────────────────────────────────────

/// Input to [`crate::store::FacilityStore::update_facility`].
///
/// `sources`, when present, replaces the facility's whole source list — the
/// store never merges. `id` and `last_updated` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacilityPatch {
  pub name:             Patch<String>,
  pub operator:         Patch<String>,
  pub address:          Patch<String>,
  pub city:             Patch<String>,
  pub country:          Patch<String>,
  pub latitude:         Patch<f64>,
  pub longitude:        Patch<f64>,
  pub status:           Patch<FacilityStatus>,
  pub ownership_type:   Patch<OwnershipType>,
  pub capacity:         Patch<Capacity>,
  pub year_established: Patch<Option<i32>>,
  pub sources:          Patch<Vec<Source>>,
  pub metadata:         Patch<Metadata>,
}

impl FacilityPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_absent()
      && self.operator.is_absent()
      && self.address.is_absent()
      && self.city.is_absent()
      && self.country.is_absent()
      && self.latitude.is_absent()
      && self.longitude.is_absent()
      && self.status.is_absent()
      && self.ownership_type.is_absent()
      && self.capacity.is_absent()
      && self.year_established.is_absent()
      && self.sources.is_absent()
      && self.metadata.is_absent()
  }

  /// Apply every present field to `facility`. Does not touch
  /// `last_updated`; that is the store's responsibility.
  pub fn apply_to(self, facility: &mut Facility) {
    self.name.apply_to(&mut facility.name);
    self.operator.apply_to(&mut facility.operator);
    self.address.apply_to(&mut facility.address);
    self.city.apply_to(&mut facility.city);
    self.country.apply_to(&mut facility.country);
    self.latitude.apply_to(&mut facility.latitude);
    self.longitude.apply_to(&mut facility.longitude);
    self.status.apply_to(&mut facility.status);
    self.ownership_type.apply_to(&mut facility.ownership_type);
    self.capacity.apply_to(&mut facility.capacity);
    self.year_established.apply_to(&mut facility.year_established);
    self.sources.apply_to(&mut facility.sources);
    self.metadata.apply_to(&mut facility.metadata);
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
