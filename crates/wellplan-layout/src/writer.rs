//! Layout writing gives every instruction a well on its plate.

use std::collections::BTreeMap;

use tracing::{debug, info};

use wellplan_core::{Plate, WellCoords, WellIter, WellOrder};

use crate::agent::LayoutOutcome;
use crate::choice::PlateChoice;
use crate::error::{LayoutError, LayoutResult};
use crate::materializer::Materialized;

/// For each choice: seed occupancy from pre-specified wells, then claim
/// the next free well for every member without one. Builds the
/// `"plateID:well"` → instruction-ID map in group order.
///
/// Running out of wells is fatal. The whole run fails rather than
/// returning instructions without a well.
pub fn write_layouts(
    materialized: Materialized,
    choices: &[PlateChoice],
    order: WellOrder,
) -> LayoutResult<LayoutOutcome> {
    let Materialized {
        mut instructions,
        mut plates,
        remap,
    } = materialized;
    let mut assignments: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for choice in choices {
        let plate_id = remap
            .get(&choice.id)
            .ok_or_else(|| LayoutError::Unassigned(choice.id.clone()))?;
        let plate = plates
            .get_mut(plate_id)
            .ok_or_else(|| LayoutError::Unassigned(choice.id.clone()))?;

        // Seed before claiming so the iterator never hands out a pinned well.
        for (index, well) in choice.members() {
            if let Some(well) = well {
                let coords = parse_seed(plate, &instructions[index].id, well)?;
                plate.occupy(coords)?;
            }
        }

        let mut iter = WellIter::new(&plate.template, order);
        let mut claimed = 0usize;

        for (index, well) in choice.members() {
            let ins = &mut instructions[index];
            let address = match well {
                Some(well) => well.to_string(),
                None => {
                    let coords =
                        plate
                            .next_empty_well(&mut iter)
                            .ok_or_else(|| LayoutError::PlateFull {
                                plate_id: plate.id.clone(),
                                plate_type: plate.plate_type().to_string(),
                                instruction: ins.id.clone(),
                            })?;
                    plate.occupy(coords)?;
                    claimed += 1;
                    let address = coords.format_a1();
                    ins.well_address = Some(address.clone());
                    address
                }
            };

            assignments
                .entry(format!("{}:{}", plate.id, address))
                .or_default()
                .push(ins.id.clone());
        }

        debug!(
            plate = %plate.id,
            instructions = choice.len(),
            claimed,
            "wrote plate layout"
        );
    }

    info!(
        plates = plates.len(),
        wells = assignments.len(),
        instructions = instructions.len(),
        "layout complete"
    );

    Ok(LayoutOutcome {
        instructions,
        output_plates: plates,
        output_assignments: assignments,
    })
}

fn parse_seed(plate: &Plate, instruction: &str, well: &str) -> LayoutResult<WellCoords> {
    let coords = WellCoords::parse_a1(well).map_err(|_| LayoutError::MalformedWell {
        instruction: instruction.to_string(),
        well: well.to_string(),
    })?;
    if !coords.within(&plate.template) {
        return Err(LayoutError::WellOutOfBounds {
            instruction: instruction.to_string(),
            well: well.to_string(),
            plate_type: plate.plate_type().to_string(),
        });
    }
    Ok(coords)
}
