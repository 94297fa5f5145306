//! Plate choices: instructions grouped for one logical plate.

use tracing::warn;

/// Why a plate choice exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOrigin {
    /// Instructions carried this plate ID.
    ExplicitPlate,
    /// Synthetic ID generated for a layout group.
    LayoutGroup,
    /// Created for otherwise unconstrained instructions.
    Unassigned,
}

impl ChoiceOrigin {
    /// Explicit plates and layout groups are fixed; only unassigned choices
    /// take in further unconstrained instructions.
    pub fn is_fixed(&self) -> bool {
        !matches!(self, ChoiceOrigin::Unassigned)
    }
}

/// An ordered group of instructions destined for one logical plate.
///
/// `assigned` holds indices into the run's instruction list. `wells` is
/// parallel to it: `wells[i]` is the pre-specified address of
/// `assigned[i]`, or `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateChoice {
    pub id: String,
    pub plate_type: String,
    pub origin: ChoiceOrigin,
    assigned: Vec<usize>,
    wells: Vec<Option<String>>,
}

impl PlateChoice {
    pub fn new(id: impl Into<String>, plate_type: impl Into<String>, origin: ChoiceOrigin) -> Self {
        Self {
            id: id.into(),
            plate_type: plate_type.into(),
            origin,
            assigned: Vec::new(),
            wells: Vec::new(),
        }
    }

    pub fn push(&mut self, index: usize, well: Option<String>) {
        self.assigned.push(index);
        self.wells.push(well);
    }

    /// Take the first stated plate type; later disagreements are logged
    /// and otherwise ignored.
    pub fn adopt_type(&mut self, plate_type: Option<&str>) {
        let Some(plate_type) = plate_type else { return };
        if self.plate_type.is_empty() {
            self.plate_type = plate_type.to_string();
        } else if self.plate_type != plate_type {
            warn!(
                choice = %self.id,
                kept = %self.plate_type,
                ignored = plate_type,
                "conflicting plate types in one plate choice"
            );
        }
    }

    pub fn assigned(&self) -> &[usize] {
        &self.assigned
    }

    pub fn wells(&self) -> &[Option<String>] {
        &self.wells
    }

    /// `(instruction index, pre-specified well)` pairs in group order.
    pub fn members(&self) -> impl Iterator<Item = (usize, Option<&str>)> + '_ {
        self.assigned
            .iter()
            .copied()
            .zip(self.wells.iter().map(|w| w.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Consecutive pieces of at most `size` members, order preserved.
    /// Each piece keeps this choice's type and origin; IDs come from `next_id`.
    pub fn chunks(&self, size: usize, mut next_id: impl FnMut() -> String) -> Vec<PlateChoice> {
        self.assigned
            .chunks(size)
            .zip(self.wells.chunks(size))
            .map(|(assigned, wells)| PlateChoice {
                id: next_id(),
                plate_type: self.plate_type.clone(),
                origin: self.origin,
                assigned: assigned.to_vec(),
                wells: wells.to_vec(),
            })
            .collect()
    }
}
