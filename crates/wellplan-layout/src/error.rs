//! Layout error types.

use thiserror::Error;

use wellplan_core::PlateError;

/// Errors that abort a layout run. No partial result is ever returned.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("plate catalog error: {0}")]
    Plate(#[from] PlateError),

    #[error("no default output plate type configured")]
    NoDefaultPlateType,

    #[error("duplicate instruction id: {0}")]
    DuplicateInstruction(String),

    #[error("instruction {instruction} has malformed well address {well:?}")]
    MalformedWell { instruction: String, well: String },

    #[error("instruction {instruction} wants well {well}, outside plate type {plate_type}")]
    WellOutOfBounds {
        instruction: String,
        well: String,
        plate_type: String,
    },

    #[error("plate {plate_id} ({plate_type}) is full; no well left for instruction {instruction}")]
    PlateFull {
        plate_id: String,
        plate_type: String,
        instruction: String,
    },

    #[error("instruction {0} was not assigned a plate")]
    Unassigned(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
