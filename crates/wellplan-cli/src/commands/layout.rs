use std::path::Path;

use tracing::info;
use wellplan_core::WellplanConfig;
use wellplan_layout::{IdGenerator, LayoutRequest, SequentialIds, UuidIds, format_report, layout};

use super::load_config;

pub fn run(
    request_path: &str,
    config_path: Option<&str>,
    format: &str,
    sequential_ids: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let request = read_request(Path::new(request_path), &config)?;
    let catalog = config.catalog()?;

    info!(
        instructions = request.instructions.len(),
        default_type = request.default_plate_type().unwrap_or("-"),
        "laying out request"
    );

    let mut ids: Box<dyn IdGenerator> = if sequential_ids || config.sequential_ids() {
        Box::new(SequentialIds::default())
    } else {
        Box::new(UuidIds)
    };

    let outcome = match layout(&request, &catalog, ids.as_mut()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Layout failed: {e}");
            return Err(e.into());
        }
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        _ => {
            println!("{}", format_report(&outcome));
        }
    }

    Ok(())
}

/// Read a JSON request and apply config overrides.
pub fn read_request(path: &Path, config: &WellplanConfig) -> anyhow::Result<LayoutRequest> {
    let content = std::fs::read_to_string(path)?;
    let mut request: LayoutRequest = serde_json::from_str(&content)?;

    if let Some(types) = config.output_platetypes() {
        request.output_platetypes = types.to_vec();
    }
    if let Some(order) = config.well_order() {
        request.well_order = order;
    }
    Ok(request)
}
