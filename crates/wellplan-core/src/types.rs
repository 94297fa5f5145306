//! Instruction type shared between the scheduler and its callers.

use serde::{Deserialize, Serialize};

/// A single liquid-handling operation that needs a plate and well.
///
/// Built upstream by the protocol compiler. The layout scheduler fills in
/// `plate_id` and `well_address` on the copies it returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_type: Option<String>,
    /// Layout-group key. Negative values (conventionally -1) mean no group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_group: Option<i32>,
}

impl Instruction {
    /// An unconstrained instruction with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            plate_id: None,
            well_address: None,
            plate_type: None,
            layout_group: None,
        }
    }

    pub fn with_plate(mut self, plate_id: impl Into<String>) -> Self {
        self.plate_id = Some(plate_id.into());
        self
    }

    pub fn with_well(mut self, well: impl Into<String>) -> Self {
        self.well_address = Some(well.into());
        self
    }

    pub fn with_plate_type(mut self, plate_type: impl Into<String>) -> Self {
        self.plate_type = Some(plate_type.into());
        self
    }

    pub fn with_layout_group(mut self, group: i32) -> Self {
        self.layout_group = Some(group);
        self
    }

    /// The layout-group key, if this instruction belongs to one.
    pub fn group_key(&self) -> Option<i32> {
        self.layout_group.filter(|g| *g >= 0)
    }

    /// Explicit plate identifier, treating an empty string as unset.
    pub fn explicit_plate(&self) -> Option<&str> {
        self.plate_id.as_deref().filter(|p| !p.is_empty())
    }

    /// Pre-specified well address, treating an empty string as unset.
    pub fn explicit_well(&self) -> Option<&str> {
        self.well_address.as_deref().filter(|w| !w.is_empty())
    }

    /// Plate type preference, treating an empty string as unset.
    pub fn preferred_type(&self) -> Option<&str> {
        self.plate_type.as_deref().filter(|t| !t.is_empty())
    }
}
