//! The export serializer: one facility collection, three byte-exact
//! encodings.
//!
//! All three formats are projections of the same canonical JSON shape:
//! `json` is that shape verbatim, `geojson` carries it unchanged in each
//! feature's `properties`, and `csv` is a flat column subset of it.

use std::str::FromStr;

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::{Error, Result, facility::Facility};

// ─── Format selection ────────────────────────────────────────────────────────

/// The supported export encodings. Anything else is an input-validation
/// error, surfaced before any output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Json,
  Csv,
  Geojson,
}

impl FromStr for ExportFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "json" => Ok(Self::Json),
      "csv" => Ok(Self::Csv),
      "geojson" => Ok(Self::Geojson),
      other => Err(Error::UnsupportedFormat(other.to_owned())),
    }
  }
}

impl ExportFormat {
  pub fn content_type(&self) -> &'static str {
    match self {
      Self::Json => "application/json",
      Self::Csv => "text/csv",
      Self::Geojson => "application/geo+json",
    }
  }

  pub fn filename(&self) -> &'static str {
    match self {
      Self::Json => "datacenters.json",
      Self::Csv => "datacenters.csv",
      Self::Geojson => "datacenters.geojson",
    }
  }
}

// ─── Output document ─────────────────────────────────────────────────────────

/// A serialized export: body bytes plus the response metadata the HTTP
/// layer needs.
#[derive(Debug, Clone)]
pub struct Export {
  pub content:      Vec<u8>,
  pub content_type: &'static str,
  pub filename:     &'static str,
}

// ─── Serializer ──────────────────────────────────────────────────────────────

/// Serialize `facilities` into the requested format.
///
/// Pure and idempotent: the same input yields byte-identical output. An
/// empty collection is not an error — it produces an empty JSON array, a
/// header-only CSV, or a feature-less FeatureCollection.
pub fn serialize(
  facilities: &[Facility],
  format: ExportFormat,
) -> Result<Export> {
  let content = match format {
    ExportFormat::Json => serde_json::to_vec(facilities)?,
    ExportFormat::Csv => to_csv(facilities)?,
    ExportFormat::Geojson => serde_json::to_vec(&feature_collection(facilities)?)?,
  };

  Ok(Export {
    content,
    content_type: format.content_type(),
    filename: format.filename(),
  })
}

// ─── GeoJSON ─────────────────────────────────────────────────────────────────

/// Build a GeoJSON `FeatureCollection` with one point feature per facility.
///
/// Coordinates are `[longitude, latitude]` per the GeoJSON convention — the
/// inverse of the facility's own field order. `properties` is the facility's
/// canonical JSON shape, identical to the `json` export's array elements.
pub fn feature_collection(facilities: &[Facility]) -> Result<serde_json::Value> {
  let features = facilities
    .iter()
    .map(|f| {
      Ok(json!({
        "type": "Feature",
        "geometry": {
          "type": "Point",
          "coordinates": [f.longitude, f.latitude],
        },
        "properties": serde_json::to_value(f)?,
      }))
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(json!({
    "type": "FeatureCollection",
    "features": features,
  }))
}

// ─── CSV ─────────────────────────────────────────────────────────────────────

/// The flat tabular projection. Field order here fixes the column order;
/// field names fix the header row. Null capacity and year render as empty
/// cells.
#[derive(Serialize)]
struct CsvRow<'a> {
  id:                Uuid,
  name:              &'a str,
  operator:          &'a str,
  city:              &'a str,
  country:           &'a str,
  latitude:          f64,
  longitude:         f64,
  status:            &'a str,
  ownership_type:    &'a str,
  power_capacity_mw: Option<f64>,
  year_established:  Option<i32>,
}

fn to_csv(facilities: &[Facility]) -> Result<Vec<u8>> {
  let mut writer = csv::Writer::from_writer(Vec::new());

  if facilities.is_empty() {
    // With no records serialized, the serde-derived header is never
    // emitted; write it explicitly so an empty catalog still yields the
    // header row.
    writer.write_record([
      "id",
      "name",
      "operator",
      "city",
      "country",
      "latitude",
      "longitude",
      "status",
      "ownership_type",
      "power_capacity_mw",
      "year_established",
    ])?;
  }

  for f in facilities {
    writer.serialize(CsvRow {
      id:                f.id,
      name:              &f.name,
      operator:          &f.operator,
      city:              &f.city,
      country:           &f.country,
      latitude:          f.latitude,
      longitude:         f.longitude,
      status:            f.status.as_str(),
      ownership_type:    f.ownership_type.as_str(),
      power_capacity_mw: f.capacity.power_mw,
      year_established:  f.year_established,
    })?;
  }

  writer
    .into_inner()
    .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
