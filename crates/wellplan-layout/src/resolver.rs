//! Assignment resolution groups instructions into plate choices.
//!
//! Two passes over the instruction list, both in insertion order:
//! 1. [`resolve_assignments`]: instructions with an explicit plate ID or a
//!    layout-group key join the choice for that ID. Group members get the
//!    group's synthetic ID written onto their copy.
//! 2. [`place_unassigned`]: everything else joins an open choice of the
//!    same plate type, or starts a new one.

use std::collections::HashMap;

use tracing::debug;

use wellplan_core::Instruction;

use crate::choice::{ChoiceOrigin, PlateChoice};
use crate::error::{LayoutError, LayoutResult};
use crate::ids::IdGenerator;

/// Layout-group key → synthetic plate ID, scoped to one layout run.
#[derive(Debug, Clone, Default)]
pub struct LayoutGroupIds {
    ids: HashMap<i32, String>,
}

impl LayoutGroupIds {
    /// The ID for `key`, generated the first time the key is seen.
    pub fn get_or_assign(&mut self, key: i32, ids: &mut dyn IdGenerator) -> String {
        self.ids
            .entry(key)
            .or_insert_with(|| {
                let id = ids.next_id();
                debug!(group = key, plate = %id, "new layout group");
                id
            })
            .clone()
    }

    /// Inspection only; the pipeline reads group IDs back off instructions.
    pub fn get(&self, key: i32) -> Option<&str> {
        self.ids.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Instructions and the plate choices built from them so far.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub instructions: Vec<Instruction>,
    pub choices: Vec<PlateChoice>,
    /// Group keys seen in this run, kept for callers inspecting a resolution.
    pub groups: LayoutGroupIds,
}

impl Resolution {
    /// Indices of instructions not yet in any choice, in insertion order.
    pub fn unassigned(&self) -> Vec<usize> {
        let mut placed = vec![false; self.instructions.len()];
        for choice in &self.choices {
            for &i in choice.assigned() {
                placed[i] = true;
            }
        }
        placed
            .iter()
            .enumerate()
            .filter(|(_, p)| !**p)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Build choices for explicit plate IDs and layout groups.
///
/// Choices that end up without a plate type get `default_type`; if one is
/// needed and none is configured the run fails.
pub fn resolve_assignments(
    instructions: &[Instruction],
    default_type: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> LayoutResult<Resolution> {
    let mut instructions = instructions.to_vec();
    let mut choices: Vec<PlateChoice> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut groups = LayoutGroupIds::default();

    for (index, ins) in instructions.iter_mut().enumerate() {
        let (plate_id, origin) = if let Some(plate) = ins.explicit_plate() {
            (plate.to_string(), ChoiceOrigin::ExplicitPlate)
        } else if let Some(key) = ins.group_key() {
            let id = groups.get_or_assign(key, ids);
            ins.plate_id = Some(id.clone());
            (id, ChoiceOrigin::LayoutGroup)
        } else {
            continue;
        };

        let slot = *by_id.entry(plate_id.clone()).or_insert_with(|| {
            choices.push(PlateChoice::new(plate_id, "", origin));
            choices.len() - 1
        });

        let choice = &mut choices[slot];
        choice.adopt_type(ins.preferred_type());
        choice.push(index, ins.explicit_well().map(str::to_string));
    }

    for choice in choices.iter_mut().filter(|c| c.plate_type.is_empty()) {
        choice.plate_type = default_type
            .ok_or(LayoutError::NoDefaultPlateType)?
            .to_string();
    }

    debug!(
        choices = choices.len(),
        groups = groups.len(),
        "resolved explicit assignments"
    );

    Ok(Resolution {
        instructions,
        choices,
        groups,
    })
}

/// Put every instruction not yet in a choice into an open choice of its
/// plate type (its own preference, else `default_type`). Choices fixed
/// by an explicit plate or a layout group never take these in.
pub fn place_unassigned(
    mut resolution: Resolution,
    default_type: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> LayoutResult<Resolution> {
    let mut open: HashMap<String, usize> = resolution
        .choices
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.origin.is_fixed())
        .map(|(i, c)| (c.plate_type.clone(), i))
        .collect();

    for index in resolution.unassigned() {
        let ins = &resolution.instructions[index];
        let plate_type = match ins.preferred_type().or(default_type) {
            Some(t) => t.to_string(),
            None => return Err(LayoutError::NoDefaultPlateType),
        };
        let well = ins.explicit_well().map(str::to_string);

        let choices = &mut resolution.choices;
        let slot = *open.entry(plate_type.clone()).or_insert_with(|| {
            let id = ids.next_id();
            debug!(plate = %id, plate_type = %plate_type, "new plate choice for unassigned instructions");
            choices.push(PlateChoice::new(id, plate_type, ChoiceOrigin::Unassigned));
            choices.len() - 1
        });
        choices[slot].push(index, well);
    }

    Ok(resolution)
}
