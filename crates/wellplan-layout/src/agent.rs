//! Layout agent. Runs the full assignment pipeline for one request.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use wellplan_core::{Instruction, Plate, PlateCatalog, WellOrder};

use crate::error::{LayoutError, LayoutResult};
use crate::ids::{IdGenerator, ReservedIds};
use crate::materializer::materialize_plates;
use crate::resolver::{place_unassigned, resolve_assignments};
use crate::splitter::split_choices;
use crate::writer::write_layouts;

/// Instructions to lay out, in insertion order, plus output preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub instructions: Vec<Instruction>,
    /// Acceptable output plate types; the first is the fallback default.
    #[serde(default)]
    pub output_platetypes: Vec<String>,
    #[serde(default)]
    pub well_order: WellOrder,
}

impl LayoutRequest {
    pub fn new(instructions: Vec<Instruction>, default_plate_type: impl Into<String>) -> Self {
        Self {
            instructions,
            output_platetypes: vec![default_plate_type.into()],
            well_order: WellOrder::default(),
        }
    }

    pub fn default_plate_type(&self) -> Option<&str> {
        self.output_platetypes.first().map(String::as_str)
    }
}

/// Result of a layout run: every instruction has a plate and a well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutOutcome {
    pub instructions: Vec<Instruction>,
    /// Concrete plate ID → plate.
    pub output_plates: BTreeMap<String, Plate>,
    /// `"plateID:well"` → instruction IDs in arrival order.
    pub output_assignments: BTreeMap<String, Vec<String>>,
}

impl LayoutOutcome {
    pub fn instruction(&self, id: &str) -> Option<&Instruction> {
        self.instructions.iter().find(|i| i.id == id)
    }

    /// `(plate ID, well address)` of an instruction.
    pub fn placement(&self, id: &str) -> Option<(&str, &str)> {
        let ins = self.instruction(id)?;
        Some((ins.plate_id.as_deref()?, ins.well_address.as_deref()?))
    }

    /// Instruction IDs on a plate, grouped by well, in well-key order.
    pub fn wells_on(&self, plate_id: &str) -> Vec<(&str, &[String])> {
        let prefix = format!("{plate_id}:");
        self.output_assignments
            .iter()
            .filter_map(|(key, ids)| Some((key.strip_prefix(&prefix)?, ids.as_slice())))
            .collect()
    }
}

/// Assign every instruction in `request` to a concrete plate and well.
///
/// The request is left untouched. Any configuration problem or capacity
/// exhaustion aborts the whole run with an error.
pub fn layout(
    request: &LayoutRequest,
    catalog: &PlateCatalog,
    ids: &mut dyn IdGenerator,
) -> LayoutResult<LayoutOutcome> {
    check_unique_ids(&request.instructions)?;
    let default_type = request.default_plate_type();

    let explicit = request.instructions.iter().filter_map(Instruction::explicit_plate);
    let mut ids = ReservedIds::new(ids, explicit);

    let resolution = resolve_assignments(&request.instructions, default_type, &mut ids)?;
    let resolution = place_unassigned(resolution, default_type, &mut ids)?;
    let choices = split_choices(resolution.choices, catalog, &mut ids)?;
    let materialized = materialize_plates(resolution.instructions, &choices, catalog, &mut ids)?;
    let outcome = write_layouts(materialized, &choices, request.well_order)?;

    for ins in &outcome.instructions {
        if ins.explicit_plate().is_none() || ins.explicit_well().is_none() {
            return Err(LayoutError::Unassigned(ins.id.clone()));
        }
    }

    info!(
        instructions = outcome.instructions.len(),
        plates = outcome.output_plates.len(),
        "laid out request"
    );
    Ok(outcome)
}

fn check_unique_ids(instructions: &[Instruction]) -> LayoutResult<()> {
    let mut seen = HashSet::with_capacity(instructions.len());
    for ins in instructions {
        if !seen.insert(ins.id.as_str()) {
            return Err(LayoutError::DuplicateInstruction(ins.id.clone()));
        }
    }
    Ok(())
}
