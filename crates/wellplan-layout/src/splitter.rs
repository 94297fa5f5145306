//! Capacity splitting: chops plate choices to fit one physical plate.

use tracing::info;

use wellplan_core::PlateCatalog;

use crate::choice::PlateChoice;
use crate::error::LayoutResult;
use crate::ids::IdGenerator;

/// Split every choice larger than its template's well count into
/// consecutive chunks of that size, each with a fresh ID. Choices that
/// fit pass through untouched. Order is preserved throughout.
pub fn split_choices(
    choices: Vec<PlateChoice>,
    catalog: &PlateCatalog,
    ids: &mut dyn IdGenerator,
) -> LayoutResult<Vec<PlateChoice>> {
    let mut out = Vec::with_capacity(choices.len());

    for choice in choices {
        // Catalog templates are validated on insert, so capacity is never zero.
        let capacity = catalog.lookup(&choice.plate_type)?.capacity();

        if choice.len() <= capacity {
            out.push(choice);
            continue;
        }

        let chunks = choice.chunks(capacity, || ids.next_id());
        info!(
            choice = %choice.id,
            plate_type = %choice.plate_type,
            instructions = choice.len(),
            capacity,
            plates = chunks.len(),
            "split plate choice across plates"
        );
        out.extend(chunks);
    }

    Ok(out)
}
