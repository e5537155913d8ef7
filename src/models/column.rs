//! Lumped Rate Model with Pores
//!
//! # Physical background
//!
//! A packed column is described by two void fractions:
//!
//! - the **bed porosity** $\varepsilon_b$, interstitial volume between particles,
//! - the **particle porosity** $\varepsilon_p$, pore volume inside the particles.
//!
//! Solutes are convected through the interstitial phase, dispersed axially
//! with coefficient $D_{ax}$, and exchanged with the particle pores through a
//! film of mass transfer coefficient $k_{f,i}$. Inside the pores, diffusion is
//! lumped into that film term (no radial pore profile), and species adsorb
//! to the stationary phase according to an optional [`BindingModel`].
//!
//! The fraction of pore volume a species can enter is its **pore
//! accessibility** $\varepsilon_{p,i}^{acc}$. Large species in size-exclusion
//! runs see only part of the pores.
//!
//! # Total porosity
//!
//! $$\varepsilon_t = \varepsilon_b + (1 - \varepsilon_b) \, \varepsilon_p$$
//!
//! # Example
//!
//! ```rust
//! use chrom_process::component::ComponentSystem;
//! use chrom_process::models::LumpedRateModelWithPores;
//! use nalgebra::DVector;
//!
//! let system = ComponentSystem::with_count(1);
//! let mut column = LumpedRateModelWithPores::new(&system, "column");
//! column.bed_porosity = 0.4;
//! column.particle_porosity = 0.5;
//! column.particle_radius = 25e-6;
//! column.length = 0.1;
//! column.diameter = 0.01;
//! column.film_diffusion = DVector::from_vec(vec![1e-5]);
//!
//! assert!(column.validate().is_ok());
//! assert!((column.total_porosity() - 0.7).abs() < 1e-12);
//! ```

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::component::ComponentSystem;
use crate::error::ModelError;
use crate::models::binding::BindingModel;
use crate::units;

/// Packed column with lumped pore diffusion
///
/// Fields are public and unchecked; call [`validate`](Self::validate)
/// before handing the column to a flow sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpedRateModelWithPores {
    /// Unit name, unique within a flow sheet
    pub name: String,

    component_system: ComponentSystem,

    // ==================== Bed ====================
    /// Interstitial porosity $\varepsilon_b$
    pub bed_porosity: f64,
    /// Intra-particle porosity $\varepsilon_p$
    pub particle_porosity: f64,
    /// \[m\]
    pub particle_radius: f64,
    /// \[m\]
    pub length: f64,
    /// \[m\]
    pub diameter: f64,

    // ==================== Transport ====================
    /// $D_{ax}$ \[m²/s\]
    pub axial_dispersion: f64,
    /// $k_f$ per species \[m/s\]
    #[serde(with = "crate::component::species_vector")]
    pub film_diffusion: DVector<f64>,
    /// Accessible pore fraction per species, in \[0, 1\]
    #[serde(with = "crate::component::species_vector")]
    pub pore_accessibility: DVector<f64>,

    // ==================== Initial state ====================
    /// Initial interstitial concentration per species \[mol/m³\]
    #[serde(with = "crate::component::species_vector")]
    pub c: DVector<f64>,
    /// Initial stationary concentration per species \[mol/m³\]
    #[serde(with = "crate::component::species_vector::option", default)]
    pub q: Option<DVector<f64>>,

    /// Adsorption on the stationary phase
    pub binding_model: Option<BindingModel>,
}

impl LumpedRateModelWithPores {
    /// Create a column with unset geometry
    ///
    /// Per-species arrays are sized from the component system: zero film
    /// diffusion, full pore accessibility, empty initial state.
    pub fn new(component_system: &ComponentSystem, name: impl Into<String>) -> Self {
        let n = component_system.n_comp();
        Self {
            name: name.into(),
            component_system: component_system.clone(),
            bed_porosity: 0.0,
            particle_porosity: 0.0,
            particle_radius: 0.0,
            length: 0.0,
            diameter: 0.0,
            axial_dispersion: 0.0,
            film_diffusion: DVector::zeros(n),
            pore_accessibility: DVector::from_element(n, 1.0),
            c: DVector::zeros(n),
            q: None,
            binding_model: None,
        }
    }

    pub fn component_system(&self) -> &ComponentSystem {
        &self.component_system
    }

    // ==================== Derived quantities ====================

    /// Column cross section \[m²\]
    pub fn cross_section_area(&self) -> f64 {
        PI * (0.5 * self.diameter).powi(2)
    }

    /// Geometric bed volume \[m³\]
    pub fn volume(&self) -> f64 {
        units::cylinder_volume(self.diameter, self.length)
    }

    /// $\varepsilon_t = \varepsilon_b + (1 - \varepsilon_b) \varepsilon_p$
    pub fn total_porosity(&self) -> f64 {
        self.bed_porosity + (1.0 - self.bed_porosity) * self.particle_porosity
    }

    /// Interstitial volume $\varepsilon_b V$ \[m³\]
    pub fn interstitial_volume(&self) -> f64 {
        self.bed_porosity * self.volume()
    }

    /// Pore volume reachable by each species \[m³\]
    pub fn accessible_pore_volume(&self) -> DVector<f64> {
        let pore_volume = (1.0 - self.bed_porosity) * self.particle_porosity * self.volume();
        &self.pore_accessibility * pore_volume
    }

    // ==================== Validation ====================

    /// Check geometry ranges and per-species array shapes
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("bed_porosity", self.bed_porosity),
            ("particle_porosity", self.particle_porosity),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ModelError::invalid(name, format!("must be in ]0,1[, got {value}")));
            }
        }

        for (name, value) in [
            ("particle_radius", self.particle_radius),
            ("length", self.length),
            ("diameter", self.diameter),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ModelError::invalid(name, format!("must be > 0, got {value}")));
            }
        }

        if !(self.axial_dispersion >= 0.0 && self.axial_dispersion.is_finite()) {
            return Err(ModelError::invalid(
                "axial_dispersion",
                format!("must be >= 0, got {}", self.axial_dispersion),
            ));
        }

        let system = &self.component_system;

        system.check_len("film_diffusion", &self.film_diffusion)?;
        if self.film_diffusion.iter().any(|k| !(*k >= 0.0)) {
            return Err(ModelError::invalid("film_diffusion", "entries must be >= 0"));
        }

        system.check_len("pore_accessibility", &self.pore_accessibility)?;
        if self
            .pore_accessibility
            .iter()
            .any(|a| !(*a >= 0.0 && *a <= 1.0))
        {
            return Err(ModelError::invalid(
                "pore_accessibility",
                "entries must be in [0, 1]",
            ));
        }

        system.check_len("c", &self.c)?;
        if let Some(q) = &self.q {
            system.check_len("q", q)?;
        }

        if let Some(binding_model) = &self.binding_model {
            binding_model.validate(system)?;
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::binding::StericMassAction;

    fn packed_column() -> LumpedRateModelWithPores {
        let system = ComponentSystem::with_count(2);
        let mut column = LumpedRateModelWithPores::new(&system, "column");
        column.bed_porosity = 0.6;
        column.particle_porosity = 0.65;
        column.particle_radius = 50e-6;
        column.length = 0.2;
        column.diameter = 0.005;
        column.axial_dispersion = 1e-7;
        column
    }

    #[test]
    fn test_new_column_defaults() {
        let system = ComponentSystem::with_count(3);
        let column = LumpedRateModelWithPores::new(&system, "column");

        assert_eq!(column.film_diffusion.len(), 3);
        assert!(column.pore_accessibility.iter().all(|a| *a == 1.0));
        assert!(column.q.is_none());
        assert!(column.binding_model.is_none());
    }

    #[test]
    fn test_unset_geometry_is_invalid() {
        let system = ComponentSystem::with_count(1);
        let column = LumpedRateModelWithPores::new(&system, "column");

        assert!(matches!(
            column.validate(),
            Err(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_derived_quantities() {
        let column = packed_column();

        assert!((column.total_porosity() - 0.86).abs() < 1e-12);
        assert!((column.volume() - 3.9269908169872417e-6).abs() < 1e-18);
        assert!((column.interstitial_volume() - 0.6 * column.volume()).abs() < 1e-18);
        assert!((column.cross_section_area() * column.length - column.volume()).abs() < 1e-18);
    }

    #[test]
    fn test_accessible_pore_volume() {
        let mut column = packed_column();
        column.pore_accessibility = DVector::from_vec(vec![1.0, 0.5]);

        let volumes = column.accessible_pore_volume();
        let full = 0.4 * 0.65 * column.volume();
        assert!((volumes[0] - full).abs() < 1e-18);
        assert!((volumes[1] - 0.5 * full).abs() < 1e-18);
    }

    #[test]
    fn test_pore_accessibility_range() {
        let mut column = packed_column();
        column.pore_accessibility = DVector::from_vec(vec![1.0, 1.5]);

        assert!(matches!(
            column.validate(),
            Err(ModelError::InvalidParameter { parameter, .. }) if parameter == "pore_accessibility"
        ));
    }

    #[test]
    fn test_q_shape_checked() {
        let mut column = packed_column();
        column.q = Some(DVector::from_vec(vec![1.0, 0.0, 0.0]));

        assert_eq!(column.validate(), Err(ModelError::shape("q", 2, 3)));
    }

    #[test]
    fn test_binding_model_validated_with_column() {
        let mut column = packed_column();
        let mut sma = StericMassAction::new(column.component_system());
        sma.adsorption_rate = DVector::from_vec(vec![1.0]);
        column.binding_model = Some(sma.into());

        assert_eq!(
            column.validate(),
            Err(ModelError::shape("adsorption_rate", 2, 1))
        );
    }
}
