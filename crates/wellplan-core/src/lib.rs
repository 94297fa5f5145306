//! Shared types for plate layout scheduling.
//!
//! Holds the leaf pieces the scheduler builds on: the plate catalog and
//! its templates, well coordinates and their A1 formatting, the well
//! iterator, materialized plates with occupancy tracking, and the
//! `wellplan.toml` configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod plate;
pub mod types;
pub mod well;

#[cfg(test)]
mod well_proptest;

pub use catalog::{PlateCatalog, PlateTemplate};
pub use config::WellplanConfig;
pub use error::{PlateError, PlateResult};
pub use plate::Plate;
pub use types::*;
pub use well::{WellCoords, WellIter, WellOrder};
