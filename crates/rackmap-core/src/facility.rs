//! Facility — the central catalog entity.
//!
//! A facility is one physical data-center location. Coordinates are the
//! single source of truth for its position; the GeoJSON point geometry is
//! always derived from them at serialization time, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Closed enumerations ─────────────────────────────────────────────────────

/// Operating status of a facility. Unknown strings are a data-entry error,
/// not a new category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacilityStatus {
  Operational,
  Planned,
  UnderConstruction,
  Decommissioned,
}

impl FacilityStatus {
  /// The wire/database string for this status. Must match the
  /// `rename_all = "kebab-case"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Operational => "operational",
      Self::Planned => "planned",
      Self::UnderConstruction => "under-construction",
      Self::Decommissioned => "decommissioned",
    }
  }
}

/// Who owns and runs the facility, relative to the host country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnershipType {
  Local,
  Foreign,
  JointVenture,
}

impl OwnershipType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Local => "local",
      Self::Foreign => "foreign",
      Self::JointVenture => "joint-venture",
    }
  }
}

// ─── Sub-objects ─────────────────────────────────────────────────────────────

/// Capacity figures; each field is independently nullable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
  pub power_mw:        Option<f64>,
  pub floor_space_sqm: Option<f64>,
  pub racks:           Option<u32>,
}

/// Free-form facility metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
  /// Tier rating string, e.g. "Tier III".
  pub tier:           Option<String>,
  pub certifications: Option<Vec<String>>,
  pub connectivity:   Option<Vec<String>>,
}

/// A citation backing a facility's data. Sources are owned by their parent
/// facility: deleting the facility deletes them, and updates to the source
/// list are a full replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
  pub url:        String,
  pub name:       String,
  pub scraped_at: DateTime<Utc>,
  pub verified:   bool,
}

// ─── Facility ────────────────────────────────────────────────────────────────

/// A physical data-center location record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
  pub id:               Uuid,
  pub name:             String,
  /// Owning organization.
  pub operator:         String,
  pub address:          String,
  pub city:             String,
  pub country:          String,
  pub latitude:         f64,
  pub longitude:        f64,
  pub status:           FacilityStatus,
  pub ownership_type:   OwnershipType,
  #[serde(default)]
  pub capacity:         Capacity,
  pub year_established: Option<i32>,
  /// Server-assigned on every mutation; never accepted from callers.
  pub last_updated:     DateTime<Utc>,
  #[serde(default)]
  pub sources:          Vec<Source>,
  #[serde(default)]
  pub metadata:         Metadata,
}

impl Facility {
  /// A facility is verified iff every one of its sources is verified.
  ///
  /// A facility with zero sources is vacuously verified. This is computed
  /// on demand and never persisted, so it cannot go stale.
  pub fn is_verified(&self) -> bool {
    self.sources.iter().all(|s| s.verified)
  }
}

// ─── NewFacility ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::FacilityStore::create_facility`].
/// `id` and `last_updated` are always set by the store; they are not
/// accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFacility {
  pub name:             String,
  pub operator:         String,
  pub address:          String,
  pub city:             String,
  pub country:          String,
  pub latitude:         f64,
  pub longitude:        f64,
  pub status:           FacilityStatus,
  pub ownership_type:   OwnershipType,
  #[serde(default)]
  pub capacity:         Capacity,
  #[serde(default)]
  pub year_established: Option<i32>,
  #[serde(default)]
  pub sources:          Vec<Source>,
  #[serde(default)]
  pub metadata:         Metadata,
}

// ─── Coordinate validation ───────────────────────────────────────────────────

/// Reject a latitude outside the signed-decimal-degree range.
pub fn validate_latitude(latitude: f64) -> Result<()> {
  if !(-90.0..=90.0).contains(&latitude) {
    return Err(Error::LatitudeOutOfRange(latitude));
  }
  Ok(())
}

/// Reject a longitude outside the signed-decimal-degree range.
pub fn validate_longitude(longitude: f64) -> Result<()> {
  if !(-180.0..=180.0).contains(&longitude) {
    return Err(Error::LongitudeOutOfRange(longitude));
  }
  Ok(())
}

/// Reject coordinates outside the signed-decimal-degree ranges.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
  validate_latitude(latitude)?;
  validate_longitude(longitude)?;
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
