//! Example: Isocratic pulse on a POROS XS column
//!
//! Assembles the adsorptive column, the ÄKTA flow sheet and the isocratic
//! schedule, prints the derived quantities, and writes the process as JSON
//! and the event table as CSV for the simulator.
//!
//! **Physical System**:
//! - Column: POROS XS cation exchanger, 20 cm × 0.5 cm
//! - Flow: 400 cm/h linear velocity
//! - Species: salt (carrier), monomer, aggregate
//!
//! An optional calibration file can be passed as first argument:
//!
//! ```bash
//! cargo run --example isocratic -- demos/poros_xs.toml
//! ```

use chrom_process::{
    akta,
    component::ComponentSystem,
    config::Calibration,
    output::{CsvExporter, Exporter, JsonExporter},
};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  POROS XS - Isocratic Pulse");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Calibration ======

    let calibration = match std::env::args().nth(1) {
        Some(path) => Calibration::load(Path::new(&path))?,
        None => Calibration::default(),
    };

    println!("Flow:");
    println!("  Velocity    : {} cm/h", calibration.flow.velocity_cm_h);
    println!("  Flow rate   : {:.4e} m³/s\n", calibration.flow_rate());

    // ====== Assembly ======

    let system = ComponentSystem::new(["Salt", "Monomer", "Aggregate"]);
    let column = akta::adsorptive_column_with(&system, &calibration)?;

    println!("Column:");
    println!("  Volume         : {:.4} mL", column.volume() * 1e6);
    println!("  Total porosity : {:.4}", column.total_porosity());
    let cv_time = akta::column_volume_time(&column, calibration.flow_rate());
    println!("  CV time        : {cv_time:.2} s\n");

    let flow_sheet = akta::akta_flow_sheet_with(&system, Some(column), &calibration)?;
    let process = akta::isocratic_process_with(flow_sheet, &calibration)?;

    println!("Schedule (cycle {:.2} s):", process.cycle_time());
    for event in process.events() {
        println!(
            "  t = {:>8.2} s  {:<8} {} = {:?}",
            event.time,
            event.name,
            event.path,
            event.state.as_slice()
        );
    }

    // ====== Export ======

    let tmp_dir = std::env::temp_dir();
    let json_path = tmp_dir.join("isocratic_process.json");
    let csv_path = tmp_dir.join("isocratic_events.csv");

    JsonExporter::default().export(&process, &json_path)?;
    CsvExporter::default().export(&process, &csv_path)?;

    println!("\nWritten:");
    println!("  {}", json_path.display());
    println!("  {}", csv_path.display());

    Ok(())
}
