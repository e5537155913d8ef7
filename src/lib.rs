//! chrom-process: Chromatography Process Assembly
//!
//! Builds the input of a chromatography process simulator: column models
//! with their binding models, flow sheets connecting the units, and timed
//! event schedules. Parameters come from lab calibration; the transport and
//! adsorption equations are solved downstream.
//!
//! # Architecture
//!
//! chrom-process separates three layers:
//!
//! 1. **Models** (what each unit is)
//!    - Component system, binding models, columns, inlets and outlets
//!    - Plain parameter containers with explicit validation
//!
//! 2. **Process** (how units are wired and driven)
//!    - Flow sheet: units and directed connections
//!    - Events: parameter changes at given times of the cycle
//!
//! 3. **Setups** (which lab experiment)
//!    - [`akta`]: ÄKTA builders for adsorptive, size-exclusion and bypass runs
//!    - [`config`]: calibration values, overridable from TOML
//!
//! # Quick Start
//!
//! ```rust
//! use chrom_process::akta;
//! use chrom_process::component::ComponentSystem;
//!
//! # fn main() -> Result<(), chrom_process::error::ModelError> {
//! // 1. Species: carrier salt first, then sample species
//! let system = ComponentSystem::new(["Salt", "mAb", "Aggregate"]);
//!
//! // 2. Column and flow sheet
//! let column = akta::adsorptive_column(&system)?;
//! let flow_sheet = akta::akta_flow_sheet(&system, Some(column))?;
//!
//! // 3. Isocratic pulse schedule
//! let process = akta::isocratic_process(flow_sheet)?;
//!
//! println!("Cycle time: {:.1} s", process.cycle_time());
//! for event in process.events() {
//!     println!("{} at {:.2} s", event.name, event.time);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`units`]: flow and volume unit derivation
//! - [`component`]: component systems
//! - [`models`]: binding models and unit operations
//! - [`process`]: flow sheets, events and processes
//! - [`akta`]: ready-made ÄKTA setups
//! - [`config`]: lab calibration
//! - [`output`]: JSON and CSV export

// Core modules
pub mod component;
pub mod error;
pub mod models;
pub mod process;
pub mod units;

pub mod akta;
pub mod config;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use chrom_process::prelude::*;
    //! ```
    pub use crate::component::ComponentSystem;
    pub use crate::config::Calibration;
    pub use crate::error::ModelError;
    pub use crate::models::{
        BindingModel, Inlet, Langmuir, LumpedRateModelWithPores, Outlet, StericMassAction,
        UnitOperation, UnitParameter,
    };
    pub use crate::process::{Event, FlowSheet, ParameterPath, Process};
}
