//! Unit operations
//!
//! The nodes of a flow sheet. Every unit carries a name (unique within its
//! flow sheet) and the component system it works on.
//!
//! Unit parameters that events may change are identified by the type-safe
//! [`UnitParameter`] enum rather than by free strings.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::component::ComponentSystem;
use crate::error::ModelError;
use crate::models::column::LumpedRateModelWithPores;

// =================================================================================================
// Unit parameters (type-safe identifiers)
// =================================================================================================

/// Parameters of a unit that can be read or scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitParameter {
    /// Mobile phase concentration `c` \[mol/m³\]
    Concentration,
    /// Volumetric flow rate \[m³/s\]
    FlowRate,
    /// Stationary phase concentration `q` \[mol/m³\]
    StationaryConcentration,
    FilmDiffusion,
    PoreAccessibility,
    AxialDispersion,
    BedPorosity,
    ParticlePorosity,
}

impl UnitParameter {
    /// Attribute name used in parameter paths
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitParameter::Concentration => "c",
            UnitParameter::FlowRate => "flow_rate",
            UnitParameter::StationaryConcentration => "q",
            UnitParameter::FilmDiffusion => "film_diffusion",
            UnitParameter::PoreAccessibility => "pore_accessibility",
            UnitParameter::AxialDispersion => "axial_dispersion",
            UnitParameter::BedPorosity => "bed_porosity",
            UnitParameter::ParticlePorosity => "particle_porosity",
        }
    }

    /// Whether the parameter holds one value per species
    pub fn is_per_species(&self) -> bool {
        matches!(
            self,
            UnitParameter::Concentration
                | UnitParameter::StationaryConcentration
                | UnitParameter::FilmDiffusion
                | UnitParameter::PoreAccessibility
        )
    }
}

impl fmt::Display for UnitParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(UnitParameter::Concentration),
            "flow_rate" => Ok(UnitParameter::FlowRate),
            "q" => Ok(UnitParameter::StationaryConcentration),
            "film_diffusion" => Ok(UnitParameter::FilmDiffusion),
            "pore_accessibility" => Ok(UnitParameter::PoreAccessibility),
            "axial_dispersion" => Ok(UnitParameter::AxialDispersion),
            "bed_porosity" => Ok(UnitParameter::BedPorosity),
            "particle_porosity" => Ok(UnitParameter::ParticlePorosity),
            other => Err(format!("unknown unit parameter '{other}'")),
        }
    }
}

// =================================================================================================
// Inlet / Outlet
// =================================================================================================

/// Feed of the flow sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inlet {
    pub name: String,
    component_system: ComponentSystem,
    /// \[m³/s\]
    pub flow_rate: f64,
    /// Feed concentration per species \[mol/m³\]
    #[serde(with = "crate::component::species_vector")]
    pub c: DVector<f64>,
}

impl Inlet {
    /// Create an inlet with zero flow and zero concentration
    pub fn new(component_system: &ComponentSystem, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component_system: component_system.clone(),
            flow_rate: 0.0,
            c: DVector::zeros(component_system.n_comp()),
        }
    }

    pub fn component_system(&self) -> &ComponentSystem {
        &self.component_system
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.flow_rate >= 0.0 && self.flow_rate.is_finite()) {
            return Err(ModelError::invalid(
                "flow_rate",
                format!("must be >= 0, got {}", self.flow_rate),
            ));
        }
        self.component_system.check_len("c", &self.c)
    }
}

/// Sink of the flow sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub name: String,
    component_system: ComponentSystem,
}

impl Outlet {
    pub fn new(component_system: &ComponentSystem, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component_system: component_system.clone(),
        }
    }

    pub fn component_system(&self) -> &ComponentSystem {
        &self.component_system
    }
}

// =================================================================================================
// Unit operation
// =================================================================================================

/// Any node of a flow sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit_type")]
pub enum UnitOperation {
    Inlet(Inlet),
    Column(LumpedRateModelWithPores),
    Outlet(Outlet),
}

impl UnitOperation {
    pub fn name(&self) -> &str {
        match self {
            UnitOperation::Inlet(unit) => &unit.name,
            UnitOperation::Column(unit) => &unit.name,
            UnitOperation::Outlet(unit) => &unit.name,
        }
    }

    pub fn component_system(&self) -> &ComponentSystem {
        match self {
            UnitOperation::Inlet(unit) => unit.component_system(),
            UnitOperation::Column(unit) => unit.component_system(),
            UnitOperation::Outlet(unit) => unit.component_system(),
        }
    }

    pub fn is_inlet(&self) -> bool {
        matches!(self, UnitOperation::Inlet(_))
    }

    pub fn is_outlet(&self) -> bool {
        matches!(self, UnitOperation::Outlet(_))
    }

    pub fn is_column(&self) -> bool {
        matches!(self, UnitOperation::Column(_))
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            UnitOperation::Inlet(unit) => unit.validate(),
            UnitOperation::Column(unit) => unit.validate(),
            UnitOperation::Outlet(_) => Ok(()),
        }
    }

    /// Current value of a parameter, `None` if the unit has no such parameter
    ///
    /// Scalar parameters are returned as one-element vectors.
    pub fn parameter(&self, parameter: UnitParameter) -> Option<DVector<f64>> {
        let scalar = |value: f64| Some(DVector::from_element(1, value));

        match (self, parameter) {
            (UnitOperation::Inlet(inlet), UnitParameter::Concentration) => Some(inlet.c.clone()),
            (UnitOperation::Inlet(inlet), UnitParameter::FlowRate) => scalar(inlet.flow_rate),

            (UnitOperation::Column(column), UnitParameter::Concentration) => {
                Some(column.c.clone())
            }
            (UnitOperation::Column(column), UnitParameter::StationaryConcentration) => Some(
                column
                    .q
                    .clone()
                    .unwrap_or_else(|| DVector::zeros(column.component_system().n_comp())),
            ),
            (UnitOperation::Column(column), UnitParameter::FilmDiffusion) => {
                Some(column.film_diffusion.clone())
            }
            (UnitOperation::Column(column), UnitParameter::PoreAccessibility) => {
                Some(column.pore_accessibility.clone())
            }
            (UnitOperation::Column(column), UnitParameter::AxialDispersion) => {
                scalar(column.axial_dispersion)
            }
            (UnitOperation::Column(column), UnitParameter::BedPorosity) => {
                scalar(column.bed_porosity)
            }
            (UnitOperation::Column(column), UnitParameter::ParticlePorosity) => {
                scalar(column.particle_porosity)
            }

            _ => None,
        }
    }
}

impl From<Inlet> for UnitOperation {
    fn from(unit: Inlet) -> Self {
        UnitOperation::Inlet(unit)
    }
}

impl From<LumpedRateModelWithPores> for UnitOperation {
    fn from(unit: LumpedRateModelWithPores) -> Self {
        UnitOperation::Column(unit)
    }
}

impl From<Outlet> for UnitOperation {
    fn from(unit: Outlet) -> Self {
        UnitOperation::Outlet(unit)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
