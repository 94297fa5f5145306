//! Property-based tests for A1 well address formatting.

use proptest::prelude::*;

use crate::well::WellCoords;

proptest! {
    #[test]
    fn a1_roundtrip(row in 0usize..=700, col in 0usize..=200) {
        let coords = WellCoords::new(col, row);
        let parsed = WellCoords::parse_a1(&coords.format_a1()).unwrap();
        prop_assert_eq!(parsed, coords);
    }

    #[test]
    fn a1_roundtrip_wide_rows(row in 0usize..=100_000) {
        let coords = WellCoords::new(0, row);
        prop_assert_eq!(WellCoords::parse_a1(&coords.format_a1()).unwrap(), coords);
    }

    #[test]
    fn lowercase_never_parses(label in "[a-z]{1,3}", col in 1usize..100) {
        let address = format!("{label}{col}");
        prop_assert!(WellCoords::parse_a1(&address).is_err());
    }
}

#[test]
fn every_row_label_up_to_700_is_distinct() {
    let mut labels: Vec<String> = (0..=700).map(|r| WellCoords::new(0, r).format_a1()).collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), 701);
}
