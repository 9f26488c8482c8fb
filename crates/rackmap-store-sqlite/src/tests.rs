//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use rackmap_core::{
  facility::{
    Capacity, FacilityStatus, Metadata, NewFacility, OwnershipType, Source,
  },
  patch::{FacilityPatch, Patch},
  store::{FacilityQuery, FacilityStore},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_facility(name: &str) -> NewFacility {
  NewFacility {
    name:             name.into(),
    operator:         "Africa Data Centres".into(),
    address:          "Sameer Business Park, Mombasa Road".into(),
    city:             "Nairobi".into(),
    country:          "Kenya".into(),
    latitude:         -1.3144,
    longitude:        36.8822,
    status:           FacilityStatus::Operational,
    ownership_type:   OwnershipType::Foreign,
    capacity:         Capacity {
      power_mw:        Some(10.0),
      floor_space_sqm: None,
      racks:           Some(500),
    },
    year_established: Some(2017),
    sources:          vec![],
    metadata:         Metadata {
      tier:           Some("Tier III".into()),
      certifications: Some(vec!["ISO 27001".into()]),
      connectivity:   None,
    },
  }
}

fn source(url: &str, verified: bool) -> Source {
  Source {
    url:        url.into(),
    name:       "Source".into(),
    scraped_at: Utc::now(),
    verified,
  }
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trips_all_fields() {
  let s = store().await;

  let mut input = new_facility("ADC Nairobi");
  input.sources = vec![source("https://a", true), source("https://b", false)];

  let created = s.create_facility(input).await.unwrap();
  let fetched = s.get_facility(created.id).await.unwrap().unwrap();

  assert_eq!(fetched.name, "ADC Nairobi");
  assert_eq!(fetched.capacity.power_mw, Some(10.0));
  assert_eq!(fetched.capacity.racks, Some(500));
  assert_eq!(fetched.year_established, Some(2017));
  assert_eq!(fetched.metadata.tier.as_deref(), Some("Tier III"));
  assert_eq!(
    fetched.metadata.certifications,
    Some(vec!["ISO 27001".to_string()])
  );
  assert_eq!(fetched.sources.len(), 2);
  assert!(!fetched.is_verified());
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_facility(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_rejects_out_of_range_coordinates() {
  let s = store().await;
  let mut input = new_facility("Broken");
  input.latitude = 91.0;

  let r = s.create_facility(input).await;
  assert!(matches!(
    r,
    Err(Error::Core(rackmap_core::Error::LatitudeOutOfRange(_)))
  ));
}

#[tokio::test]
async fn timestamps_are_store_assigned() {
  let s = store().await;
  let before = Utc::now();
  let created = s.create_facility(new_facility("DC")).await.unwrap();
  assert!(created.last_updated >= before);
}

// ─── List / filters ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_orders_by_name() {
  let s = store().await;
  s.create_facility(new_facility("Charlie DC")).await.unwrap();
  s.create_facility(new_facility("Alpha DC")).await.unwrap();
  s.create_facility(new_facility("Bravo DC")).await.unwrap();

  let all = s.list_facilities(&FacilityQuery::default()).await.unwrap();
  let names: Vec<&str> = all.iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["Alpha DC", "Bravo DC", "Charlie DC"]);
}

#[tokio::test]
async fn list_filters_by_status_and_country() {
  let s = store().await;

  let mut planned = new_facility("Planned DC");
  planned.status = FacilityStatus::Planned;
  s.create_facility(planned).await.unwrap();

  let mut abroad = new_facility("Lagos DC");
  abroad.country = "Nigeria".into();
  s.create_facility(abroad).await.unwrap();

  s.create_facility(new_facility("Operational DC")).await.unwrap();

  let query = FacilityQuery {
    status: Some(FacilityStatus::Operational),
    country: Some("Kenya".into()),
    ..Default::default()
  };
  let matched = s.list_facilities(&query).await.unwrap();
  assert_eq!(matched.len(), 1);
  assert_eq!(matched[0].name, "Operational DC");
}

#[tokio::test]
async fn list_text_filter_matches_operator() {
  let s = store().await;
  let mut other = new_facility("Other DC");
  other.operator = "Safaricom".into();
  s.create_facility(other).await.unwrap();
  s.create_facility(new_facility("ADC DC")).await.unwrap();

  let query = FacilityQuery {
    text: Some("Safari".into()),
    ..Default::default()
  };
  let matched = s.list_facilities(&query).await.unwrap();
  assert_eq!(matched.len(), 1);
  assert_eq!(matched[0].operator, "Safaricom");
}

#[tokio::test]
async fn verified_filter_uses_derived_state() {
  let s = store().await;

  let mut verified = new_facility("Verified DC");
  verified.sources = vec![source("https://a", true)];
  s.create_facility(verified).await.unwrap();

  let mut pending = new_facility("Pending DC");
  pending.sources = vec![source("https://a", true), source("https://b", false)];
  s.create_facility(pending).await.unwrap();

  // Zero sources: vacuously verified.
  s.create_facility(new_facility("Sourceless DC")).await.unwrap();

  let verified_only = s
    .list_facilities(&FacilityQuery {
      verified: Some(true),
      ..Default::default()
    })
    .await
    .unwrap();
  let names: Vec<&str> = verified_only.iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["Sourceless DC", "Verified DC"]);

  let pending_only = s
    .list_facilities(&FacilityQuery {
      verified: Some(false),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(pending_only.len(), 1);
  assert_eq!(pending_only[0].name, "Pending DC");
}

#[tokio::test]
async fn list_respects_limit_and_offset() {
  let s = store().await;
  for name in ["A", "B", "C", "D"] {
    s.create_facility(new_facility(name)).await.unwrap();
  }

  let page = s
    .list_facilities(&FacilityQuery {
      limit: Some(2),
      offset: Some(1),
      ..Default::default()
    })
    .await
    .unwrap();
  let names: Vec<&str> = page.iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["B", "C"]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_present_fields() {
  let s = store().await;
  let created = s.create_facility(new_facility("Before")).await.unwrap();

  let patch = FacilityPatch {
    name: Patch::Set("After".into()),
    status: Patch::Set(FacilityStatus::UnderConstruction),
    ..Default::default()
  };
  let updated = s.update_facility(created.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.name, "After");
  assert_eq!(updated.status, FacilityStatus::UnderConstruction);
  // Untouched fields survive.
  assert_eq!(updated.operator, created.operator);
  assert_eq!(updated.year_established, created.year_established);
  assert_eq!(updated.capacity, created.capacity);
}

#[tokio::test]
async fn update_refreshes_last_updated() {
  let s = store().await;
  let created = s.create_facility(new_facility("DC")).await.unwrap();

  let patch = FacilityPatch {
    name: Patch::Set("DC 2".into()),
    ..Default::default()
  };
  let updated = s.update_facility(created.id, patch).await.unwrap().unwrap();
  assert!(updated.last_updated >= created.last_updated);
}

#[tokio::test]
async fn update_can_clear_nullable_fields() {
  let s = store().await;
  let created = s.create_facility(new_facility("DC")).await.unwrap();
  assert_eq!(created.year_established, Some(2017));

  let patch: FacilityPatch =
    serde_json::from_str(r#"{"yearEstablished":null}"#).unwrap();
  let updated = s.update_facility(created.id, patch).await.unwrap().unwrap();
  assert_eq!(updated.year_established, None);

  let fetched = s.get_facility(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.year_established, None);
}

#[tokio::test]
async fn update_replaces_source_list_wholesale() {
  let s = store().await;
  let mut input = new_facility("DC");
  input.sources = vec![source("https://old-1", false), source("https://old-2", false)];
  let created = s.create_facility(input).await.unwrap();

  let patch = FacilityPatch {
    sources: Patch::Set(vec![source("https://new", true)]),
    ..Default::default()
  };
  let updated = s.update_facility(created.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.sources.len(), 1);
  assert_eq!(updated.sources[0].url, "https://new");
  assert!(updated.is_verified());

  let fetched = s.get_facility(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.sources.len(), 1);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let r = s
    .update_facility(Uuid::new_v4(), FacilityPatch::default())
    .await
    .unwrap();
  assert!(r.is_none());
}

#[tokio::test]
async fn update_write_detects_concurrently_deleted_row() {
  let s = store().await;
  let mut input = new_facility("DC");
  input.sources = vec![source("https://a", true)];
  let created = s.create_facility(input).await.unwrap();

  // Simulate a delete landing between an update's read and its write.
  let mut stale = s.get_facility(created.id).await.unwrap().unwrap();
  assert!(s.delete_facility(created.id).await.unwrap());

  stale.name = "Renamed".into();
  assert!(!s.write_facility(&stale, true).await.unwrap());
  assert!(s.get_facility(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_rejects_out_of_range_coordinates() {
  let s = store().await;
  let created = s.create_facility(new_facility("DC")).await.unwrap();

  let patch = FacilityPatch {
    longitude: Patch::Set(181.0),
    ..Default::default()
  };
  let r = s.update_facility(created.id, patch).await;
  assert!(matches!(
    r,
    Err(Error::Core(rackmap_core::Error::LongitudeOutOfRange(_)))
  ));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_facility_and_sources() {
  let s = store().await;
  let mut input = new_facility("DC");
  input.sources = vec![source("https://a", true)];
  let created = s.create_facility(input).await.unwrap();

  assert!(s.delete_facility(created.id).await.unwrap());
  assert!(s.get_facility(created.id).await.unwrap().is_none());

  // The cascade left nothing behind that the verified filter could see.
  let pending = s
    .list_facilities(&FacilityQuery {
      verified: Some(false),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(pending.is_empty());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_facility(Uuid::new_v4()).await.unwrap());
}
