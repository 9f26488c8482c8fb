//! Error types for `rackmap-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("latitude {0} outside [-90, 90]")]
  LatitudeOutOfRange(f64),

  #[error("longitude {0} outside [-180, 180]")]
  LongitudeOutOfRange(f64),

  #[error("unsupported export format: {0:?}")]
  UnsupportedFormat(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
