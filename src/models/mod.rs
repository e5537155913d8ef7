//! Unit and binding models
//!
//! Models only carry parameters. The simulator evaluates the equations;
//! the crate is responsible for assembling consistent parameter sets.
//!
//! # Available Models
//!
//! ## [`LumpedRateModelWithPores`]: packed column
//!
//! Convection, axial dispersion and film mass transfer into particle pores,
//! with an optional [`BindingModel`] for adsorption. Size-exclusion runs use
//! the per-species pore accessibility instead of a binding model.
//!
//! ## [`StericMassAction`] and [`Langmuir`]: binding models
//!
//! Ion-exchange and competitive Langmuir isotherms. Owned by the column they
//! are attached to.
//!
//! ## [`Inlet`] and [`Outlet`]
//!
//! Feed and sink of a flow sheet. The inlet concentration is the parameter
//! process events change over time.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod binding;
pub mod column;
pub mod unit;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use binding::{BindingModel, Langmuir, StericMassAction};
pub use column::LumpedRateModelWithPores;
pub use unit::{Inlet, Outlet, UnitOperation, UnitParameter};
