//! Materialized plates: concrete plate instances with well occupancy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::PlateTemplate;
use crate::error::{PlateError, PlateResult};
use crate::well::{WellCoords, WellIter};

/// A concrete plate allocated from a catalog template.
///
/// Occupancy is an opaque per-well claim counter, indexed by column then
/// row. It marks wells as taken; it is not a liquid volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub id: String,
    pub template: Arc<PlateTemplate>,
    claims: Vec<Vec<u32>>,
}

impl Plate {
    pub fn new(id: impl Into<String>, template: Arc<PlateTemplate>) -> Self {
        let claims = vec![vec![0; template.rows]; template.columns];
        Self {
            id: id.into(),
            template,
            claims,
        }
    }

    pub fn plate_type(&self) -> &str {
        &self.template.name
    }

    /// Record one claim on a well.
    pub fn occupy(&mut self, coords: WellCoords) -> PlateResult<()> {
        let out_of_bounds = || PlateError::WellOutOfBounds {
            well: coords.format_a1(),
            plate_type: self.template.name.clone(),
        };
        let slot = self
            .claims
            .get_mut(coords.col)
            .and_then(|col| col.get_mut(coords.row))
            .ok_or_else(out_of_bounds)?;
        *slot += 1;
        Ok(())
    }

    /// Number of claims recorded on a well (0 outside the grid).
    pub fn claims(&self, coords: WellCoords) -> u32 {
        self.claims
            .get(coords.col)
            .and_then(|col| col.get(coords.row))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_occupied(&self, coords: WellCoords) -> bool {
        self.claims(coords) > 0
    }

    /// Pull coordinates from `iter` until an unoccupied well turns up.
    /// Returns `None` once the iterator is exhausted.
    pub fn next_empty_well(&self, iter: &mut WellIter) -> Option<WellCoords> {
        iter.find(|coords| !self.is_occupied(*coords))
    }

    /// Every occupied well in column-major order.
    pub fn occupied_wells(&self) -> Vec<WellCoords> {
        self.claims
            .iter()
            .enumerate()
            .flat_map(|(col, rows)| {
                rows.iter()
                    .enumerate()
                    .filter(|(_, n)| **n > 0)
                    .map(move |(row, _)| WellCoords::new(col, row))
            })
            .collect()
    }

    pub fn free_wells(&self) -> usize {
        self.template.capacity() - self.occupied_wells().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well::WellOrder;

    fn plate(rows: usize, columns: usize) -> Plate {
        let template = PlateTemplate::new("grid", rows, columns, 50.0).unwrap();
        Plate::new("p1", Arc::new(template))
    }

    #[test]
    fn next_empty_skips_occupied() {
        let mut p = plate(8, 12);
        p.occupy(WellCoords::new(0, 0)).unwrap();
        p.occupy(WellCoords::new(0, 2)).unwrap();

        let mut it = WellIter::new(&p.template, WellOrder::ColumnMajor);
        assert_eq!(p.next_empty_well(&mut it), Some(WellCoords::new(0, 1)));
        assert_eq!(p.next_empty_well(&mut it), Some(WellCoords::new(0, 3)));
    }

    #[test]
    fn next_empty_exhausts() {
        let mut p = plate(1, 2);
        p.occupy(WellCoords::new(1, 0)).unwrap();

        let mut it = WellIter::new(&p.template, WellOrder::ColumnMajor);
        assert_eq!(p.next_empty_well(&mut it), Some(WellCoords::new(0, 0)));
        assert_eq!(p.next_empty_well(&mut it), None);
    }

    #[test]
    fn occupy_counts_claims() {
        let mut p = plate(2, 2);
        let c = WellCoords::new(1, 1);
        p.occupy(c).unwrap();
        p.occupy(c).unwrap();
        assert_eq!(p.claims(c), 2);
        assert_eq!(p.occupied_wells(), vec![c]);
        assert_eq!(p.free_wells(), 3);
    }

    #[test]
    fn occupy_out_of_bounds_fails() {
        let mut p = plate(2, 2);
        let err = p.occupy(WellCoords::new(2, 0)).unwrap_err();
        assert!(matches!(err, PlateError::WellOutOfBounds { ref well, .. } if well == "A3"));
        assert!(p.occupied_wells().is_empty());
    }
}
