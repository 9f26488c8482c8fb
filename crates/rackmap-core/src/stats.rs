//! The aggregation engine: summary statistics over the facility collection.
//!
//! A single pure pass over the materialized collection; the input is never
//! mutated and repeated calls over the same input produce identical output.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::facility::Facility;

// ─── Output types ────────────────────────────────────────────────────────────

/// One point of the founding-year time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
  pub year:  i32,
  pub count: usize,
}

/// Summary statistics over the whole catalog.
///
/// `by_country` is an insertion-ordered map: entries are emitted sorted by
/// descending count, ties in first-occurrence order, and that ordering is
/// part of the wire contract (JSON object key order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
  pub total_data_centers: usize,
  pub by_status:          BTreeMap<String, usize>,
  pub by_ownership:       BTreeMap<String, usize>,
  pub by_country:         IndexMap<String, usize>,
  #[serde(rename = "totalCapacityMW")]
  pub total_capacity_mw:  f64,
  pub average_capacity:   f64,
  pub growth_by_year:     Vec<YearCount>,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Compute summary statistics over `facilities`.
///
/// Grouping keys are taken verbatim (case-sensitive). Facilities with a null
/// power capacity are excluded from the capacity sum and mean but still
/// counted everywhere else; null founding years are excluded from the growth
/// series entirely. An empty subset yields an average of `0.0`, not NaN.
pub fn compute_statistics(facilities: &[Facility]) -> Statistics {
  let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
  let mut by_ownership: BTreeMap<String, usize> = BTreeMap::new();
  let mut country_counts: IndexMap<String, usize> = IndexMap::new();
  let mut growth: BTreeMap<i32, usize> = BTreeMap::new();
  let mut capacity_sum = 0.0_f64;
  let mut capacity_n = 0_usize;

  for f in facilities {
    *by_status.entry(f.status.as_str().to_owned()).or_insert(0) += 1;
    *by_ownership
      .entry(f.ownership_type.as_str().to_owned())
      .or_insert(0) += 1;
    *country_counts.entry(f.country.clone()).or_insert(0) += 1;

    if let Some(mw) = f.capacity.power_mw {
      capacity_sum += mw;
      capacity_n += 1;
    }
    if let Some(year) = f.year_established {
      *growth.entry(year).or_insert(0) += 1;
    }
  }

  // Descending count; the stable sort keeps ties in first-occurrence order.
  let mut country_pairs: Vec<(String, usize)> =
    country_counts.into_iter().collect();
  country_pairs.sort_by(|a, b| b.1.cmp(&a.1));
  let by_country: IndexMap<String, usize> = country_pairs.into_iter().collect();

  let average_capacity = if capacity_n == 0 {
    0.0
  } else {
    capacity_sum / capacity_n as f64
  };

  Statistics {
    total_data_centers: facilities.len(),
    by_status,
    by_ownership,
    by_country,
    total_capacity_mw: capacity_sum,
    average_capacity,
    growth_by_year: growth
      .into_iter()
      .map(|(year, count)| YearCount { year, count })
      .collect(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
