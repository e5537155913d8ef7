//! ÄKTA process setups
//!
//! Builders that assemble the columns, flow sheets and isocratic process
//! used to characterise a POROS XS cation-exchange column on an ÄKTA
//! system. Every builder has a `*_with` variant taking an explicit
//! [`Calibration`]; the plain variants use [`Calibration::default`].
//!
//! # Species convention
//!
//! Component systems passed to these builders are ordered as
//! `[salt, protein, ...]`:
//!
//! - species 0 is the carrier salt: it does not bind on its own, is
//!   present in the running buffer, and pre-loads the stationary phase up
//!   to the ionic capacity,
//! - every following species is sample (protein) and shares the protein
//!   binding parameters of the calibration.
//!
//! # Example
//!
//! ```rust
//! use chrom_process::akta;
//! use chrom_process::component::ComponentSystem;
//!
//! let system = ComponentSystem::new(["Salt", "mAb", "Aggregate"]);
//! let column = akta::adsorptive_column(&system).unwrap();
//! let flow_sheet = akta::akta_flow_sheet(&system, Some(column)).unwrap();
//! let process = akta::isocratic_process(flow_sheet).unwrap();
//!
//! assert_eq!(process.events().len(), 2);
//! assert!((process.cycle_time() - 270.0).abs() < 1e-6);
//! ```

use nalgebra::DVector;

use crate::component::ComponentSystem;
use crate::config::{BindingCalibration, Calibration};
use crate::error::ModelError;
use crate::models::{Inlet, LumpedRateModelWithPores, Outlet, StericMassAction};
use crate::process::{FlowSheet, Process};
use crate::units;

/// Unit names used in ÄKTA flow sheets
pub const INLET: &str = "inlet";
pub const COLUMN: &str = "column";
pub const OUTLET: &str = "outlet";

/// Cycle length of the isocratic process, in column volumes
pub const CYCLE_TIME_FACTOR: f64 = 1.5;

/// Injection length of the isocratic process, in column volumes
pub const INJECTION_FRACTION: f64 = 0.05;

// =================================================================================================
// Columns
// =================================================================================================

/// Steric Mass Action model with salt parameters at index 0 and protein
/// parameters for every other species
pub fn steric_mass_action(
    component_system: &ComponentSystem,
    binding: &BindingCalibration,
) -> Result<StericMassAction, ModelError> {
    let n = component_system.n_comp();
    if n < 2 {
        return Err(ModelError::invalid(
            "component_system",
            format!("Steric Mass Action needs a salt and at least one protein, got {n} species"),
        ));
    }

    let mut model = StericMassAction::new(component_system);
    model.is_kinetic = binding.is_kinetic;
    model.adsorption_rate = salt_protein(n, binding.adsorption_rate);
    model.desorption_rate = salt_protein(n, binding.desorption_rate);
    model.capacity = binding.capacity;
    model.steric_factor = salt_protein(n, binding.steric_factor);
    model.characteristic_charge = salt_protein(n, binding.characteristic_charge);

    Ok(model)
}

/// Pore-transport column with a Steric Mass Action binding model
///
/// The stationary phase starts saturated with salt: `q = [capacity, 0, ...]`.
pub fn adsorptive_column(
    component_system: &ComponentSystem,
) -> Result<LumpedRateModelWithPores, ModelError> {
    adsorptive_column_with(component_system, &Calibration::default())
}

pub fn adsorptive_column_with(
    component_system: &ComponentSystem,
    calibration: &Calibration,
) -> Result<LumpedRateModelWithPores, ModelError> {
    let binding_model = steric_mass_action(component_system, &calibration.binding)?;

    let mut column = packed_column(component_system, calibration);
    column.q = Some(salt_only(component_system.n_comp(), binding_model.capacity));
    column.binding_model = Some(binding_model.into());
    column.validate()?;

    log::debug!(
        "Built adsorptive column '{}' ({} species, capacity {})",
        column.name,
        component_system.n_comp(),
        calibration.binding.capacity
    );
    Ok(column)
}

/// Pore-transport column for size-exclusion runs
///
/// No binding model and no stationary phase state; large species are kept
/// out of the pores through the pore accessibility of the calibration.
pub fn size_exclusion_column(
    component_system: &ComponentSystem,
) -> Result<LumpedRateModelWithPores, ModelError> {
    size_exclusion_column_with(component_system, &Calibration::default())
}

pub fn size_exclusion_column_with(
    component_system: &ComponentSystem,
    calibration: &Calibration,
) -> Result<LumpedRateModelWithPores, ModelError> {
    let mut column = packed_column(component_system, calibration);
    column.pore_accessibility = DVector::from_vec(calibration.column.pore_accessibility.clone());
    column.validate()?;

    log::debug!(
        "Built size-exclusion column '{}' ({} species)",
        column.name,
        component_system.n_comp()
    );
    Ok(column)
}

// =================================================================================================
// Flow sheet
// =================================================================================================

/// Inlet → column → outlet, or inlet → outlet when no column is given
///
/// The bypass layout is used for tracer runs measuring the system dead
/// volume.
pub fn akta_flow_sheet(
    component_system: &ComponentSystem,
    column: Option<LumpedRateModelWithPores>,
) -> Result<FlowSheet, ModelError> {
    akta_flow_sheet_with(component_system, column, &Calibration::default())
}

pub fn akta_flow_sheet_with(
    component_system: &ComponentSystem,
    column: Option<LumpedRateModelWithPores>,
    calibration: &Calibration,
) -> Result<FlowSheet, ModelError> {
    let mut inlet = Inlet::new(component_system, INLET);
    inlet.flow_rate = calibration.flow_rate();
    let outlet = Outlet::new(component_system, OUTLET);

    let mut flow_sheet = FlowSheet::new(component_system);
    flow_sheet.add_unit(inlet)?;

    match column {
        Some(column) => {
            let name = column.name.clone();
            flow_sheet.add_unit(column)?;
            flow_sheet.add_unit(outlet)?;
            flow_sheet.add_connection(INLET, &name)?;
            flow_sheet.add_connection(&name, OUTLET)?;
        }
        None => {
            flow_sheet.add_unit(outlet)?;
            flow_sheet.add_connection(INLET, OUTLET)?;
        }
    }

    log::debug!(
        "Built flow sheet with {} units and {} connections",
        flow_sheet.n_units(),
        flow_sheet.connections().len()
    );
    Ok(flow_sheet)
}

// =================================================================================================
// Process
// =================================================================================================

/// Time to pass one column volume at `flow_rate` \[s\]
pub fn column_volume_time(column: &LumpedRateModelWithPores, flow_rate: f64) -> f64 {
    units::transit_time(units::cylinder_volume(column.diameter, column.length), flow_rate)
}

/// Isocratic pulse: sample injection at t = 0, wash with running buffer
/// after 0.05 CV, cycle of 1.5 CV
///
/// # Errors
///
/// [`ModelError::MissingUnit`] when the flow sheet has no column (bypass
/// layout): the schedule is defined in column volumes.
pub fn isocratic_process(flow_sheet: FlowSheet) -> Result<Process, ModelError> {
    isocratic_process_with(flow_sheet, &Calibration::default())
}

pub fn isocratic_process_with(
    flow_sheet: FlowSheet,
    calibration: &Calibration,
) -> Result<Process, ModelError> {
    let column = flow_sheet.column().ok_or(ModelError::MissingUnit("column"))?;
    let inlet = flow_sheet.inlet().ok_or(ModelError::MissingUnit("inlet"))?;

    let cv_time = column_volume_time(column, calibration.flow_rate());
    let inlet_path = format!("flow_sheet.{}.c", inlet.name);

    let n = flow_sheet.component_system().n_comp();
    if n == 0 {
        return Err(ModelError::invalid(
            "component_system",
            "needs the salt species to build the inlet concentrations",
        ));
    }
    let salt = calibration.column.salt_concentration;
    let sample = units::mol_l_to_mol_m3(calibration.sample_concentration());

    let mut inject = DVector::from_element(n, sample);
    inject[0] = salt;
    let elution = salt_only(n, salt);

    let elution_time = cv_time * calibration.schedule.injection_fraction;

    let mut process = Process::new(flow_sheet, "process isocratic");
    process.set_cycle_time(cv_time * calibration.schedule.cycle_time_factor)?;
    process.add_event("inject", &inlet_path, inject, 0.0)?;
    process.add_event("elution", &inlet_path, elution, elution_time)?;

    log::info!(
        "Isocratic process: CV time {:.3} s, cycle {:.3} s, injection until {:.3} s",
        cv_time,
        process.cycle_time(),
        process.event_times().last().copied().unwrap_or_default()
    );
    Ok(process)
}

// =================================================================================================
// Helpers
// =================================================================================================

fn packed_column(
    component_system: &ComponentSystem,
    calibration: &Calibration,
) -> LumpedRateModelWithPores {
    let parameters = &calibration.column;

    let mut column = LumpedRateModelWithPores::new(component_system, COLUMN);
    column.bed_porosity = parameters.bed_porosity;
    column.particle_porosity = parameters.particle_porosity;
    column.particle_radius = parameters.particle_radius;
    column.film_diffusion = DVector::from_vec(parameters.film_diffusion.clone());
    column.length = parameters.length;
    column.diameter = parameters.diameter;
    column.axial_dispersion = parameters.axial_dispersion;
    column.c = salt_only(component_system.n_comp(), parameters.salt_concentration);
    column
}

/// `[salt, protein, protein, ...]` of length `n`
fn salt_protein(n: usize, [salt, protein]: [f64; 2]) -> DVector<f64> {
    let mut values = DVector::from_element(n, protein);
    if n > 0 {
        values[0] = salt;
    }
    values
}

/// `[value, 0, 0, ...]` of length `n`
fn salt_only(n: usize, value: f64) -> DVector<f64> {
    let mut values = DVector::zeros(n);
    if n > 0 {
        values[0] = value;
    }
    values
}

// =================================================================================================
// Tests
// =================================================================================================
