//! Error types for plate catalogs, well addresses and configuration.

use thiserror::Error;

/// Result type alias for catalog and plate operations.
pub type PlateResult<T> = Result<T, PlateError>;

/// Errors raised by the plate catalog, well parsing and config loading.
#[derive(Debug, Error)]
pub enum PlateError {
    #[error("unknown plate type: {0}")]
    UnknownPlateType(String),

    #[error("plate type {name} has invalid geometry ({rows} rows x {columns} columns)")]
    InvalidGeometry { name: String, rows: usize, columns: usize },

    #[error("plate type already in catalog: {0}")]
    DuplicatePlateType(String),

    #[error("malformed well address: {0:?}")]
    MalformedWell(String),

    #[error("well {well} is outside plate {plate_type}")]
    WellOutOfBounds { well: String, plate_type: String },

    #[error("config error: {0}")]
    Config(String),
}
