//! SQL schema for the Rackmap SQLite store.
//!
//! The DDL runs on every connection open and is idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. `PRAGMA user_version` is written but not
//! yet consulted; it is reserved for gating future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS data_centers (
    id                TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    operator          TEXT NOT NULL,
    address           TEXT NOT NULL,
    city              TEXT NOT NULL,
    country           TEXT NOT NULL,
    latitude          REAL NOT NULL,
    longitude         REAL NOT NULL,
    status            TEXT NOT NULL,  -- 'operational' | 'planned' | 'under-construction' | 'decommissioned'
    ownership_type    TEXT NOT NULL,  -- 'local' | 'foreign' | 'joint-venture'
    power_capacity_mw REAL,
    floor_space_sqm   REAL,
    rack_count        INTEGER,
    year_established  INTEGER,
    tier_rating       TEXT,
    certifications    TEXT,           -- JSON array or NULL
    connectivity      TEXT,           -- JSON array or NULL
    updated_at        TEXT NOT NULL   -- ISO 8601 UTC; store-assigned
);

-- Sources have no independent lifecycle: they are cascade-deleted with
-- their facility, and updates replace the whole set.
CREATE TABLE IF NOT EXISTS sources (
    source_id      TEXT PRIMARY KEY,
    data_center_id TEXT NOT NULL REFERENCES data_centers(id) ON DELETE CASCADE,
    url            TEXT NOT NULL,
    name           TEXT NOT NULL,
    scraped_at     TEXT NOT NULL,
    verified       INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS data_centers_country_idx ON data_centers(country);
CREATE INDEX IF NOT EXISTS data_centers_status_idx  ON data_centers(status);
CREATE INDEX IF NOT EXISTS sources_facility_idx     ON sources(data_center_id);

PRAGMA user_version = 1;
";
