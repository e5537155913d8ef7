//! Example: Size-exclusion and bypass runs
//!
//! The same column without binding, where the aggregate only reaches 1% of
//! the pore volume, next to the bypass flow sheet used for dead-volume tracer
//! runs. The bypass has no column, so no column-volume schedule can be built
//! for it.

use chrom_process::{
    akta,
    component::ComponentSystem,
    units,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Size-Exclusion vs Bypass");
    println!("═══════════════════════════════════════════════════════\n");

    let system = ComponentSystem::new(["Salt", "Monomer", "Aggregate"]);

    // ====== Size exclusion ======

    let column = akta::size_exclusion_column(&system)?;
    let pore_volumes = column.accessible_pore_volume();

    println!("Accessible pore volume:");
    for (name, volume) in system.names().iter().zip(pore_volumes.iter()) {
        println!("  {:<10}: {:.4} mL", name, volume * 1e6);
    }

    let flow_sheet = akta::akta_flow_sheet(&system, Some(column))?;
    let process = akta::isocratic_process(flow_sheet)?;
    println!("\nSEC cycle time: {:.2} s", process.cycle_time());

    // ====== Bypass ======

    let bypass = akta::akta_flow_sheet(&system, None)?;
    println!("\nBypass: {} units, {} connection(s)", bypass.n_units(), bypass.connections().len());
    println!(
        "Tracer pulse: {:.2} mL ({:.1} s at {:.3} mL/min)",
        units::V_TRACER * 1e6,
        units::transit_time(units::V_TRACER, units::Q_M3S),
        units::Q_ML_MIN
    );

    match akta::isocratic_process(bypass) {
        Ok(_) => println!("Unexpected schedule for bypass"),
        Err(e) => println!("Isocratic schedule on bypass: {e}"),
    }

    Ok(())
}
