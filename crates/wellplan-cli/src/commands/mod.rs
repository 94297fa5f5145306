pub mod layout;
pub mod plates;

use std::path::Path;

use wellplan_core::WellplanConfig;

/// Load `wellplan.toml` if a path was given, else the defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<WellplanConfig> {
    match path {
        Some(p) => Ok(WellplanConfig::from_file(Path::new(p))?),
        None => Ok(WellplanConfig::default()),
    }
}
