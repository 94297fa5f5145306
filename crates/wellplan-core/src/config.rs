//! wellplan.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{PlateCatalog, PlateTemplate};
use crate::error::{PlateError, PlateResult};
use crate::well::WellOrder;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellplanConfig {
    pub layout: Option<LayoutConfig>,
    #[serde(default, rename = "plate", skip_serializing_if = "Vec::is_empty")]
    pub plates: Vec<PlateConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Replaces the request's default output plate types when set.
    pub output_platetypes: Option<Vec<String>>,
    pub well_order: Option<WellOrder>,
    pub sequential_ids: Option<bool>,
}

/// An extra plate type added on top of the built-in library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateConfig {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub well_volume_ul: f64,
    pub description: Option<String>,
}

impl WellplanConfig {
    pub fn from_file(path: &Path) -> PlateResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlateError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PlateResult<Self> {
        toml::from_str(content).map_err(|e| PlateError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> PlateResult<String> {
        toml::to_string_pretty(self).map_err(|e| PlateError::Config(e.to_string()))
    }

    /// The built-in catalog extended with every `[[plate]]` entry.
    pub fn catalog(&self) -> PlateResult<PlateCatalog> {
        let mut catalog = PlateCatalog::builtin();
        for plate in &self.plates {
            let mut template =
                PlateTemplate::new(&plate.name, plate.rows, plate.columns, plate.well_volume_ul)?;
            template.description = plate.description.clone();
            catalog.insert(template)?;
        }
        Ok(catalog)
    }

    pub fn output_platetypes(&self) -> Option<&[String]> {
        self.layout.as_ref()?.output_platetypes.as_deref()
    }

    pub fn well_order(&self) -> Option<WellOrder> {
        self.layout.as_ref()?.well_order
    }

    pub fn sequential_ids(&self) -> bool {
        self.layout
            .as_ref()
            .and_then(|l| l.sequential_ids)
            .unwrap_or(false)
    }

    /// Scaffold a minimal wellplan.toml.
    pub fn scaffold() -> Self {
        WellplanConfig {
            layout: Some(LayoutConfig {
                output_platetypes: Some(vec!["pcrplate_with_cooler".to_string()]),
                well_order: Some(WellOrder::ColumnMajor),
                sequential_ids: Some(false),
            }),
            plates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_scaffold() {
        let config = WellplanConfig::scaffold();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("pcrplate_with_cooler"));
        assert!(toml_str.contains("column-major"));
    }

    #[test]
    fn test_parse_minimal() {
        let config = WellplanConfig::from_toml_str("").unwrap();
        assert!(config.layout.is_none());
        assert!(config.plates.is_empty());
        assert!(!config.sequential_ids());
    }

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[layout]
output_platetypes = ["DSW96", "SRWFB96"]
well_order = "row-major"
sequential_ids = true

[[plate]]
name = "custom384"
rows = 16
columns = 24
well_volume_ul = 100.0
description = "384-well assay plate"
"#;
        let config = WellplanConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(
            config.output_platetypes().unwrap(),
            ["DSW96".to_string(), "SRWFB96".to_string()]
        );
        assert_eq!(config.well_order(), Some(WellOrder::RowMajor));
        assert!(config.sequential_ids());

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.lookup("custom384").unwrap().capacity(), 384);
        assert!(catalog.contains("DSW96"));
    }

    #[test]
    fn test_catalog_rejects_zero_rows() {
        let toml_str = r#"
[[plate]]
name = "broken"
rows = 0
columns = 12
well_volume_ul = 10.0
"#;
        let config = WellplanConfig::from_toml_str(toml_str).unwrap();
        assert!(matches!(config.catalog(), Err(PlateError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_catalog_rejects_huge_geometry() {
        let toml_str = r#"
[[plate]]
name = "huge"
rows = 4294967296
columns = 4294967296
well_volume_ul = 10.0
"#;
        let config = WellplanConfig::from_toml_str(toml_str).unwrap();
        assert!(matches!(
            config.catalog(),
            Err(PlateError::InvalidGeometry { ref name, .. }) if name == "huge"
        ));

        let too_many = r#"
[[plate]]
name = "dense"
rows = 1024
columns = 1024
well_volume_ul = 0.1
"#;
        let config = WellplanConfig::from_toml_str(too_many).unwrap();
        assert!(matches!(config.catalog(), Err(PlateError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_catalog_rejects_builtin_override() {
        let toml_str = r#"
[[plate]]
name = "DSW96"
rows = 4
columns = 6
well_volume_ul = 10.0
"#;
        let config = WellplanConfig::from_toml_str(toml_str).unwrap();
        assert!(matches!(config.catalog(), Err(PlateError::DuplicatePlateType(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nsequential_ids = true").unwrap();

        let config = WellplanConfig::from_file(file.path()).unwrap();
        assert!(config.sequential_ids());
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WellplanConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PlateError::Config(_)));
    }
}
