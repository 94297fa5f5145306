//! Plate materialization: one concrete plate per plate choice.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use wellplan_core::{Instruction, Plate, PlateCatalog};

use crate::choice::PlateChoice;
use crate::error::{LayoutError, LayoutResult};
use crate::ids::IdGenerator;

/// Instructions rewritten onto concrete plates.
#[derive(Debug, Clone)]
pub struct Materialized {
    pub instructions: Vec<Instruction>,
    /// Concrete plate ID → plate.
    pub plates: BTreeMap<String, Plate>,
    /// Plate-choice ID → concrete plate ID.
    pub remap: HashMap<String, String>,
}

/// Copy each choice's ID and plate type onto its instructions.
pub fn apply_choices(instructions: &mut [Instruction], choices: &[PlateChoice]) {
    for choice in choices {
        for &index in choice.assigned() {
            let ins = &mut instructions[index];
            ins.plate_id = Some(choice.id.clone());
            ins.plate_type = Some(choice.plate_type.clone());
        }
    }
}

/// Walk instructions in order; the first one naming a choice ID allocates
/// a plate for it, later ones reuse that plate through the remap table.
/// Every instruction's plate ID is rewritten to its concrete plate.
pub fn materialize_plates(
    mut instructions: Vec<Instruction>,
    choices: &[PlateChoice],
    catalog: &PlateCatalog,
    ids: &mut dyn IdGenerator,
) -> LayoutResult<Materialized> {
    apply_choices(&mut instructions, choices);

    let types: HashMap<&str, &str> = choices
        .iter()
        .map(|c| (c.id.as_str(), c.plate_type.as_str()))
        .collect();

    let mut plates = BTreeMap::new();
    let mut remap: HashMap<String, String> = HashMap::new();

    for ins in &mut instructions {
        let choice_id = ins
            .plate_id
            .clone()
            .ok_or_else(|| LayoutError::Unassigned(ins.id.clone()))?;

        if let Some(plate_id) = remap.get(&choice_id) {
            ins.plate_id = Some(plate_id.clone());
            continue;
        }

        let plate_type = types
            .get(choice_id.as_str())
            .copied()
            .ok_or_else(|| LayoutError::Unassigned(ins.id.clone()))?;
        let plate = Plate::new(ids.next_id(), catalog.lookup(plate_type)?);
        debug!(choice = %choice_id, plate = %plate.id, plate_type, "allocated plate");

        ins.plate_id = Some(plate.id.clone());
        remap.insert(choice_id, plate.id.clone());
        plates.insert(plate.id.clone(), plate);
    }

    Ok(Materialized {
        instructions,
        plates,
        remap,
    })
}
