//! Plate catalog mapping plate-type names to immutable well-grid templates.
//!
//! Templates are shared by `Arc` across every plate of the same type and
//! are never mutated once in the catalog.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlateError, PlateResult};

/// Upper bound on wells per plate type. Real labware tops out at 1536.
pub const MAX_WELLS: usize = 1 << 16;

/// Geometry and capacity of a plate type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateTemplate {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Nominal working volume of a single well in microlitres.
    pub well_volume_ul: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlateTemplate {
    /// Build a template, rejecting grids with no wells.
    pub fn new(
        name: impl Into<String>,
        rows: usize,
        columns: usize,
        well_volume_ul: f64,
    ) -> PlateResult<Self> {
        let template = Self {
            name: name.into(),
            rows,
            columns,
            well_volume_ul,
            description: None,
        };
        template.validate()?;
        Ok(template)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Total well count (`rows * columns`).
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Fail if the grid has no wells or more than [`MAX_WELLS`].
    pub fn validate(&self) -> PlateResult<()> {
        let wells = self.rows.checked_mul(self.columns).unwrap_or(usize::MAX);
        if wells == 0 || wells > MAX_WELLS {
            return Err(PlateError::InvalidGeometry {
                name: self.name.clone(),
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

/// In-memory lookup of plate templates by type name.
#[derive(Debug, Clone, Default)]
pub struct PlateCatalog {
    templates: HashMap<String, Arc<PlateTemplate>>,
}

impl PlateCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard plate library.
    pub fn builtin() -> Self {
        let entries = [
            ("DSW96", 8, 12, 2000.0, "96-well deep square well plate"),
            ("SRWFB96", 8, 12, 500.0, "96-well round well flat bottom plate"),
            ("DWST12", 1, 12, 15000.0, "12-trough deep well strip reservoir"),
            ("DWST8", 8, 1, 24000.0, "8-trough deep well strip reservoir"),
            ("DWR1", 1, 1, 300000.0, "single-well deep reservoir"),
            ("pcrplate_with_cooler", 8, 12, 250.0, "96-well PCR plate on a cooling block"),
        ];

        let templates = entries
            .into_iter()
            .map(|(name, rows, columns, volume, description)| {
                let template = PlateTemplate {
                    name: name.to_string(),
                    rows,
                    columns,
                    well_volume_ul: volume,
                    description: Some(description.to_string()),
                };
                (name.to_string(), Arc::new(template))
            })
            .collect();

        Self { templates }
    }

    /// Add a template. Rejects empty grids and names already present.
    pub fn insert(&mut self, template: PlateTemplate) -> PlateResult<()> {
        template.validate()?;
        if self.templates.contains_key(&template.name) {
            return Err(PlateError::DuplicatePlateType(template.name));
        }
        debug!(
            plate_type = %template.name,
            rows = template.rows,
            columns = template.columns,
            "registered plate type"
        );
        self.templates.insert(template.name.clone(), Arc::new(template));
        Ok(())
    }

    /// Look up a template by plate-type name.
    pub fn lookup(&self, plate_type: &str) -> PlateResult<Arc<PlateTemplate>> {
        self.templates
            .get(plate_type)
            .cloned()
            .ok_or_else(|| PlateError::UnknownPlateType(plate_type.to_string()))
    }

    pub fn contains(&self, plate_type: &str) -> bool {
        self.templates.contains_key(plate_type)
    }

    /// Sorted list of known plate-type names.
    pub fn plate_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        names.sort();
        names
    }

    /// Templates in name order.
    pub fn templates(&self) -> Vec<Arc<PlateTemplate>> {
        self.plate_types()
            .iter()
            .filter_map(|name| self.templates.get(name).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_standard_plates() {
        let catalog = PlateCatalog::builtin();
        assert_eq!(catalog.len(), 6);

        let dsw = catalog.lookup("DSW96").unwrap();
        assert_eq!((dsw.rows, dsw.columns), (8, 12));
        assert_eq!(dsw.capacity(), 96);

        assert_eq!(catalog.lookup("DWST8").unwrap().capacity(), 8);
        assert_eq!(catalog.lookup("DWR1").unwrap().capacity(), 1);
    }

    #[test]
    fn lookup_unknown_type_fails() {
        let catalog = PlateCatalog::builtin();
        assert!(matches!(
            catalog.lookup("nope"),
            Err(PlateError::UnknownPlateType(name)) if name == "nope"
        ));
    }

    #[test]
    fn lookups_share_one_template() {
        let catalog = PlateCatalog::builtin();
        let a = catalog.lookup("SRWFB96").unwrap();
        let b = catalog.lookup("SRWFB96").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn plate_types_are_sorted() {
        let types = PlateCatalog::builtin().plate_types();
        let mut sorted = types.clone();
        sorted.sort();
        assert_eq!(types, sorted);
        assert!(types.contains(&"pcrplate_with_cooler".to_string()));
    }

    #[test]
    fn insert_rejects_zero_geometry() {
        let mut catalog = PlateCatalog::new();
        let bad = PlateTemplate {
            name: "flat".to_string(),
            rows: 0,
            columns: 12,
            well_volume_ul: 10.0,
            description: None,
        };
        assert!(matches!(catalog.insert(bad), Err(PlateError::InvalidGeometry { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut catalog = PlateCatalog::builtin();
        let dup = PlateTemplate::new("DSW96", 8, 12, 1.0).unwrap();
        assert!(matches!(catalog.insert(dup), Err(PlateError::DuplicatePlateType(_))));
    }

    #[test]
    fn insert_rejects_oversized_geometry() {
        let mut catalog = PlateCatalog::new();
        assert!(matches!(
            PlateTemplate::new("wide", 300, 300, 1.0),
            Err(PlateError::InvalidGeometry { rows: 300, columns: 300, .. })
        ));
        let overflowing = PlateTemplate {
            name: "overflow".to_string(),
            rows: usize::MAX,
            columns: 2,
            well_volume_ul: 1.0,
            description: None,
        };
        assert_eq!(overflowing.capacity(), usize::MAX);
        assert!(matches!(catalog.insert(overflowing), Err(PlateError::InvalidGeometry { .. })));
        assert!(PlateTemplate::new("max", 256, 256, 1.0).is_ok());
    }

    #[test]
    fn template_new_validates() {
        assert!(PlateTemplate::new("x", 4, 0, 1.0).is_err());
        assert_eq!(PlateTemplate::new("x", 16, 24, 1.0).unwrap().capacity(), 384);
    }
}
