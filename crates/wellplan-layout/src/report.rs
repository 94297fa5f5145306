//! Human-readable layout report.

use crate::agent::LayoutOutcome;

pub fn format_report(outcome: &LayoutOutcome) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n╔══════════════════════════════════════════╗\n"));
    out.push_str(&format!("║  Wellplan Plate Layout                   ║\n"));
    out.push_str(&format!("╠══════════════════════════════════════════╣\n"));
    out.push_str(&format!("║  Instructions: {:<25} ║\n", outcome.instructions.len()));
    out.push_str(&format!("║  Plates:       {:<25} ║\n", outcome.output_plates.len()));
    out.push_str(&format!("║  Wells used:   {:<25} ║\n", outcome.output_assignments.len()));
    out.push_str(&format!("╚══════════════════════════════════════════╝\n\n"));

    for (id, plate) in &outcome.output_plates {
        let capacity = plate.template.capacity();
        let used = capacity - plate.free_wells();
        out.push_str(&format!("{} ({})  {used}/{capacity} wells\n", id, plate.plate_type()));

        for (well, ids) in outcome.wells_on(id) {
            out.push_str(&format!("  {well:<6} {}\n", ids.join(", ")));
        }
        out.push('\n');
    }

    out
}
