//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. String lists
//! (certifications, connectivity) are stored as compact JSON arrays. UUIDs
//! are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use rackmap_core::facility::{
  Capacity, Facility, FacilityStatus, Metadata, OwnershipType, Source,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── FacilityStatus
// ───────────────────────────────────────────────────────────

pub fn encode_status(s: FacilityStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<FacilityStatus> {
  match s {
    "operational" => Ok(FacilityStatus::Operational),
    "planned" => Ok(FacilityStatus::Planned),
    "under-construction" => Ok(FacilityStatus::UnderConstruction),
    "decommissioned" => Ok(FacilityStatus::Decommissioned),
    other => Err(Error::Decode(format!("unknown status: {other:?}"))),
  }
}

// ─── OwnershipType
// ────────────────────────────────────────────────────────────

pub fn encode_ownership(o: OwnershipType) -> &'static str { o.as_str() }

pub fn decode_ownership(s: &str) -> Result<OwnershipType> {
  match s {
    "local" => Ok(OwnershipType::Local),
    "foreign" => Ok(OwnershipType::Foreign),
    "joint-venture" => Ok(OwnershipType::JointVenture),
    other => Err(Error::Decode(format!("unknown ownership type: {other:?}"))),
  }
}

// ─── String lists ────────────────────────────────────────────────────────────

pub fn encode_string_list(list: &Option<Vec<String>>) -> Result<Option<String>> {
  list
    .as_ref()
    .map(|l| Ok(serde_json::to_string(l)?))
    .transpose()
}

pub fn decode_string_list(s: Option<&str>) -> Result<Option<Vec<String>>> {
  s.map(|s| Ok(serde_json::from_str(s)?)).transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `data_centers` row.
pub struct RawFacility {
  pub id:                String,
  pub name:              String,
  pub operator:          String,
  pub address:           String,
  pub city:              String,
  pub country:           String,
  pub latitude:          f64,
  pub longitude:         f64,
  pub status:            String,
  pub ownership_type:    String,
  pub power_capacity_mw: Option<f64>,
  pub floor_space_sqm:   Option<f64>,
  pub rack_count:        Option<u32>,
  pub year_established:  Option<i32>,
  pub tier_rating:       Option<String>,
  pub certifications:    Option<String>,
  pub connectivity:      Option<String>,
  pub updated_at:        String,
}

impl RawFacility {
  pub fn into_facility(self, sources: Vec<Source>) -> Result<Facility> {
    Ok(Facility {
      id:               decode_uuid(&self.id)?,
      name:             self.name,
      operator:         self.operator,
      address:          self.address,
      city:             self.city,
      country:          self.country,
      latitude:         self.latitude,
      longitude:        self.longitude,
      status:           decode_status(&self.status)?,
      ownership_type:   decode_ownership(&self.ownership_type)?,
      capacity:         Capacity {
        power_mw:        self.power_capacity_mw,
        floor_space_sqm: self.floor_space_sqm,
        racks:           self.rack_count,
      },
      year_established: self.year_established,
      last_updated:     decode_dt(&self.updated_at)?,
      sources,
      metadata:         Metadata {
        tier:           self.tier_rating,
        certifications: decode_string_list(self.certifications.as_deref())?,
        connectivity:   decode_string_list(self.connectivity.as_deref())?,
      },
    })
  }
}

/// Raw values read directly from a `sources` row.
pub struct RawSource {
  pub url:        String,
  pub name:       String,
  pub scraped_at: String,
  pub verified:   bool,
}

impl RawSource {
  pub fn into_source(self) -> Result<Source> {
    Ok(Source {
      url:        self.url,
      name:       self.name,
      scraped_at: decode_dt(&self.scraped_at)?,
      verified:   self.verified,
    })
  }
}
