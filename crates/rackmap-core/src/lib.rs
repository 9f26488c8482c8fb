//! Core types and trait definitions for the Rackmap facility catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod export;
pub mod facility;
pub mod patch;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
