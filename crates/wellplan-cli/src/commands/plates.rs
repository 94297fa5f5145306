use std::path::Path;

use wellplan_core::WellplanConfig;

use super::load_config;

pub fn list(config_path: Option<&str>) -> anyhow::Result<()> {
    let catalog = load_config(config_path)?.catalog()?;

    println!("{:<22} {:>5} {:>5} {:>6} {:>10}", "TYPE", "ROWS", "COLS", "WELLS", "VOLUME_UL");
    for t in catalog.templates() {
        println!(
            "{:<22} {:>5} {:>5} {:>6} {:>10}",
            t.name,
            t.rows,
            t.columns,
            t.capacity(),
            t.well_volume_ul
        );
    }

    Ok(())
}

pub fn init(path: &str) -> anyhow::Result<()> {
    let output = Path::new(path).join("wellplan.toml");
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }
    std::fs::write(&output, WellplanConfig::scaffold().to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
