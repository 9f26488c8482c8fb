//! JSON REST API for the Rackmap facility catalog.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rackmap_core::store::FacilityStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rackmap_api::api_router(store.clone()))
//! ```

pub mod datacenters;
pub mod error;
pub mod export;
pub mod statistics;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use rackmap_core::store::FacilityStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FacilityStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Data centers
    .route(
      "/datacenters",
      get(datacenters::list::<S>).post(datacenters::create::<S>),
    )
    .route("/datacenters/geojson", get(export::geojson::<S>))
    .route("/datacenters/export/{format}", get(export::download::<S>))
    .route(
      "/datacenters/{id}",
      get(datacenters::get_one::<S>)
        .put(datacenters::update_one::<S>)
        .delete(datacenters::delete_one::<S>),
    )
    // Statistics
    .route("/statistics", get(statistics::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
