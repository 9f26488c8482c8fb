//! [`SqliteStore`] — the SQLite implementation of [`FacilityStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rackmap_core::{
  facility::{Facility, NewFacility, validate_coordinates},
  patch::FacilityPatch,
  store::{FacilityQuery, FacilityStore},
};

use crate::{
  Error, Result,
  encode::{
    RawFacility, RawSource, encode_dt, encode_ownership, encode_status,
    encode_string_list, encode_uuid,
  },
  schema::SCHEMA,
};

const FACILITY_COLUMNS: &str = "id, name, operator, address, city, country, \
                                latitude, longitude, status, ownership_type, \
                                power_capacity_mw, floor_space_sqm, rack_count, \
                                year_established, tier_rating, certifications, \
                                connectivity, updated_at";

fn map_facility_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFacility> {
  Ok(RawFacility {
    id:                row.get(0)?,
    name:              row.get(1)?,
    operator:          row.get(2)?,
    address:           row.get(3)?,
    city:              row.get(4)?,
    country:           row.get(5)?,
    latitude:          row.get(6)?,
    longitude:         row.get(7)?,
    status:            row.get(8)?,
    ownership_type:    row.get(9)?,
    power_capacity_mw: row.get(10)?,
    floor_space_sqm:   row.get(11)?,
    rack_count:        row.get(12)?,
    year_established:  row.get(13)?,
    tier_rating:       row.get(14)?,
    certifications:    row.get(15)?,
    connectivity:      row.get(16)?,
    updated_at:        row.get(17)?,
  })
}

fn map_source_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSource> {
  Ok(RawSource {
    url:        row.get(0)?,
    name:       row.get(1)?,
    scraped_at: row.get(2)?,
    verified:   row.get(3)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A facility catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Write a fully-built [`Facility`] and its sources in one transaction.
  ///
  /// Used by create (insert) and update (full-row rewrite). The source set
  /// is always replaced wholesale; sources never survive their facility's
  /// row independently. Returns `false` when an update targets a row that
  /// no longer exists — nothing is written in that case.
  pub(crate) async fn write_facility(
    &self,
    facility: &Facility,
    update: bool,
  ) -> Result<bool> {
    let id_str             = encode_uuid(facility.id);
    let name               = facility.name.clone();
    let operator           = facility.operator.clone();
    let address            = facility.address.clone();
    let city               = facility.city.clone();
    let country            = facility.country.clone();
    let latitude           = facility.latitude;
    let longitude          = facility.longitude;
    let status_str         = encode_status(facility.status).to_owned();
    let ownership_str      = encode_ownership(facility.ownership_type).to_owned();
    let power_capacity_mw  = facility.capacity.power_mw;
    let floor_space_sqm    = facility.capacity.floor_space_sqm;
    let rack_count         = facility.capacity.racks;
    let year_established   = facility.year_established;
    let tier_rating        = facility.metadata.tier.clone();
    let certifications_str = encode_string_list(&facility.metadata.certifications)?;
    let connectivity_str   = encode_string_list(&facility.metadata.connectivity)?;
    let updated_at_str     = encode_dt(facility.last_updated);

    let sources: Vec<(String, String, String, String, bool)> = facility
      .sources
      .iter()
      .map(|s| {
        (
          encode_uuid(Uuid::new_v4()),
          s.url.clone(),
          s.name.clone(),
          encode_dt(s.scraped_at),
          s.verified,
        )
      })
      .collect();

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if update {
          let n = tx.execute(
            "UPDATE data_centers SET
               name = ?2, operator = ?3, address = ?4, city = ?5,
               country = ?6, latitude = ?7, longitude = ?8, status = ?9,
               ownership_type = ?10, power_capacity_mw = ?11,
               floor_space_sqm = ?12, rack_count = ?13,
               year_established = ?14, tier_rating = ?15,
               certifications = ?16, connectivity = ?17, updated_at = ?18
             WHERE id = ?1",
            rusqlite::params![
              id_str,
              name,
              operator,
              address,
              city,
              country,
              latitude,
              longitude,
              status_str,
              ownership_str,
              power_capacity_mw,
              floor_space_sqm,
              rack_count,
              year_established,
              tier_rating,
              certifications_str,
              connectivity_str,
              updated_at_str,
            ],
          )?;
          if n == 0 {
            // Row vanished between read and write; dropping the
            // uncommitted transaction rolls everything back.
            return Ok(false);
          }
          tx.execute(
            "DELETE FROM sources WHERE data_center_id = ?1",
            rusqlite::params![id_str],
          )?;
        } else {
          tx.execute(
            "INSERT INTO data_centers (
               id, name, operator, address, city, country,
               latitude, longitude, status, ownership_type,
               power_capacity_mw, floor_space_sqm, rack_count,
               year_established, tier_rating, certifications, connectivity,
               updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                       ?13, ?14, ?15, ?16, ?17, ?18)",
            rusqlite::params![
              id_str,
              name,
              operator,
              address,
              city,
              country,
              latitude,
              longitude,
              status_str,
              ownership_str,
              power_capacity_mw,
              floor_space_sqm,
              rack_count,
              year_established,
              tier_rating,
              certifications_str,
              connectivity_str,
              updated_at_str,
            ],
          )?;
        }

        for (source_id, url, source_name, scraped_at, verified) in &sources {
          tx.execute(
            "INSERT INTO sources (source_id, data_center_id, url, name,
                                  scraped_at, verified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![source_id, id_str, url, source_name, scraped_at, verified],
          )?;
        }

        tx.commit()?;
        Ok(true)
      })
      .await?;
    Ok(written)
  }
}

// ─── FacilityStore impl ──────────────────────────────────────────────────────

impl FacilityStore for SqliteStore {
  type Error = Error;

  async fn create_facility(&self, input: NewFacility) -> Result<Facility> {
    validate_coordinates(input.latitude, input.longitude)?;

    let facility = Facility {
      id:               Uuid::new_v4(),
      name:             input.name,
      operator:         input.operator,
      address:          input.address,
      city:             input.city,
      country:          input.country,
      latitude:         input.latitude,
      longitude:        input.longitude,
      status:           input.status,
      ownership_type:   input.ownership_type,
      capacity:         input.capacity,
      year_established: input.year_established,
      last_updated:     Utc::now(),
      sources:          input.sources,
      metadata:         input.metadata,
    };

    self.write_facility(&facility, false).await?;
    Ok(facility)
  }

  async fn get_facility(&self, id: Uuid) -> Result<Option<Facility>> {
    let id_str = encode_uuid(id);

    let raw: Option<(RawFacility, Vec<RawSource>)> = self
      .conn
      .call(move |conn| {
        let facility = conn
          .query_row(
            &format!("SELECT {FACILITY_COLUMNS} FROM data_centers WHERE id = ?1"),
            rusqlite::params![id_str],
            map_facility_row,
          )
          .optional()?;

        let Some(facility) = facility else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT url, name, scraped_at, verified FROM sources
           WHERE data_center_id = ?1",
        )?;
        let sources = stmt
          .query_map(rusqlite::params![id_str], map_source_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((facility, sources)))
      })
      .await?;

    let Some((facility, sources)) = raw else {
      return Ok(None);
    };
    let sources = sources
      .into_iter()
      .map(RawSource::into_source)
      .collect::<Result<Vec<_>>>()?;
    facility.into_facility(sources).map(Some)
  }

  async fn list_facilities(&self, query: &FacilityQuery) -> Result<Vec<Facility>> {
    let text_pattern  = query.text.as_deref().map(|t| format!("%{t}%"));
    let status_str    = query.status.map(encode_status).map(str::to_owned);
    let ownership_str = query.ownership.map(encode_ownership).map(str::to_owned);
    let country_str   = query.country.clone();
    let verified      = query.verified;
    let limit_val     = query.limit.map(|n| n as i64).unwrap_or(-1);
    let offset_val    = query.offset.unwrap_or(0) as i64;

    type RawRows = (Vec<RawFacility>, HashMap<String, Vec<RawSource>>);

    let (raw_facilities, mut raw_sources): RawRows = self
      .conn
      .call(move |conn| {
        // Build WHERE clause dynamically; placeholders are fixed, unused
        // ones are simply never referenced.
        let mut conds: Vec<&'static str> = vec![];
        if text_pattern.is_some() {
          conds.push("(dc.name LIKE ?1 OR dc.operator LIKE ?1 OR dc.city LIKE ?1)");
        }
        if status_str.is_some() {
          conds.push("dc.status = ?2");
        }
        if ownership_str.is_some() {
          conds.push("dc.ownership_type = ?3");
        }
        if country_str.is_some() {
          conds.push("dc.country = ?4");
        }
        match verified {
          // Verified facilities have no unverified source (zero sources
          // count as verified).
          Some(true) => conds.push(
            "NOT EXISTS (SELECT 1 FROM sources s
                         WHERE s.data_center_id = dc.id AND s.verified = 0)",
          ),
          Some(false) => conds.push(
            "EXISTS (SELECT 1 FROM sources s
                     WHERE s.data_center_id = dc.id AND s.verified = 0)",
          ),
          None => {}
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {FACILITY_COLUMNS} FROM data_centers dc
           {where_clause}
           ORDER BY dc.name
           LIMIT ?5 OFFSET ?6"
        );

        let mut stmt = conn.prepare(&sql)?;
        let facilities = stmt
          .query_map(
            rusqlite::params![
              text_pattern.as_deref(),
              status_str.as_deref(),
              ownership_str.as_deref(),
              country_str.as_deref(),
              limit_val,
              offset_val,
            ],
            map_facility_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        // One scan over the sources table, grouped by facility; the
        // catalog is small enough that filtering here is not worth the
        // dynamic-SQL complexity of an IN clause.
        let mut stmt = conn.prepare(
          "SELECT data_center_id, url, name, scraped_at, verified FROM sources",
        )?;
        let mut grouped: HashMap<String, Vec<RawSource>> = HashMap::new();
        let rows = stmt.query_map([], |row| {
          let facility_id: String = row.get(0)?;
          Ok((facility_id, RawSource {
            url:        row.get(1)?,
            name:       row.get(2)?,
            scraped_at: row.get(3)?,
            verified:   row.get(4)?,
          }))
        })?;
        for row in rows {
          let (facility_id, source) = row?;
          grouped.entry(facility_id).or_default().push(source);
        }

        Ok((facilities, grouped))
      })
      .await?;

    raw_facilities
      .into_iter()
      .map(|raw| {
        let sources = raw_sources
          .remove(&raw.id)
          .unwrap_or_default()
          .into_iter()
          .map(RawSource::into_source)
          .collect::<Result<Vec<_>>>()?;
        raw.into_facility(sources)
      })
      .collect()
  }

  async fn update_facility(
    &self,
    id: Uuid,
    patch: FacilityPatch,
  ) -> Result<Option<Facility>> {
    let Some(mut facility) = self.get_facility(id).await? else {
      return Ok(None);
    };

    patch.apply_to(&mut facility);
    validate_coordinates(facility.latitude, facility.longitude)?;
    facility.last_updated = Utc::now();

    // The row may have been deleted since the read above; the write
    // reports that as a zero-row update.
    if !self.write_facility(&facility, true).await? {
      return Ok(None);
    }
    Ok(Some(facility))
  }

  async fn delete_facility(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM data_centers WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }
}
