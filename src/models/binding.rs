//! Binding models
//!
//! A binding model describes how species partition between the mobile phase
//! and the stationary phase of a column. The crate only stores the
//! parameters; the isotherm equations are evaluated by the simulator.
//!
//! # Available models
//!
//! | Model                 | Parameters                                                   |
//! |-----------------------|--------------------------------------------------------------|
//! | [`StericMassAction`]  | $k_a$, $k_d$, $\Lambda$, $\sigma$, $\nu$ (salt at index 0)   |
//! | [`Langmuir`]          | $k_a$, $k_d$, $q_{max}$                                      |
//!
//! Rates are per species; every array must have one entry per species of the
//! column's [`ComponentSystem`].

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::component::ComponentSystem;
use crate::error::ModelError;

// =================================================================================================
// Steric Mass Action
// =================================================================================================

/// Steric Mass Action (ion-exchange) isotherm
///
/// Species 0 is the salt counter-ion; it does not bind by itself but its
/// stationary concentration closes the electroneutrality balance
///
/// $$\Lambda = q_0 + \sum_{i>0} \nu_i \, q_i$$
///
/// The steric factor $\sigma_i$ counts the sites shielded by a bound
/// protein, the characteristic charge $\nu_i$ the sites it occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StericMassAction {
    /// Rapid-equilibrium when `false`
    pub is_kinetic: bool,
    /// $k_a$ per species
    #[serde(with = "crate::component::species_vector")]
    pub adsorption_rate: DVector<f64>,
    /// $k_d$ per species
    #[serde(with = "crate::component::species_vector")]
    pub desorption_rate: DVector<f64>,
    /// Total ionic capacity $\Lambda$ \[mol/m³\]
    pub capacity: f64,
    /// $\sigma$ per species
    #[serde(with = "crate::component::species_vector")]
    pub steric_factor: DVector<f64>,
    /// $\nu$ per species
    #[serde(with = "crate::component::species_vector")]
    pub characteristic_charge: DVector<f64>,
}

impl StericMassAction {
    /// Create a model with zero rates and capacity for every species
    pub fn new(component_system: &ComponentSystem) -> Self {
        let n = component_system.n_comp();
        Self {
            is_kinetic: true,
            adsorption_rate: DVector::zeros(n),
            desorption_rate: DVector::zeros(n),
            capacity: 0.0,
            steric_factor: DVector::zeros(n),
            characteristic_charge: DVector::zeros(n),
        }
    }

    /// Check array shapes and signs
    pub fn validate(&self, component_system: &ComponentSystem) -> Result<(), ModelError> {
        let arrays = [
            ("adsorption_rate", &self.adsorption_rate),
            ("desorption_rate", &self.desorption_rate),
            ("steric_factor", &self.steric_factor),
            ("characteristic_charge", &self.characteristic_charge),
        ];

        for (name, values) in arrays {
            component_system.check_len(name, values)?;
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ModelError::invalid(name, "entries must be finite and >= 0"));
            }
        }

        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(ModelError::invalid(
                "capacity",
                format!("must be finite and >= 0, got {}", self.capacity),
            ));
        }

        Ok(())
    }
}

// =================================================================================================
// Langmuir
// =================================================================================================

/// Multi-component Langmuir isotherm
///
/// $$q_i^* = \frac{q_{max,i} \, K_i \, c_i}{1 + \sum_j K_j c_j}, \qquad K_i = k_{a,i}/k_{d,i}$$
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Langmuir {
    pub is_kinetic: bool,
    #[serde(with = "crate::component::species_vector")]
    pub adsorption_rate: DVector<f64>,
    #[serde(with = "crate::component::species_vector")]
    pub desorption_rate: DVector<f64>,
    /// $q_{max}$ per species \[mol/m³\]
    #[serde(with = "crate::component::species_vector")]
    pub capacity: DVector<f64>,
}

impl Langmuir {
    pub fn new(component_system: &ComponentSystem) -> Self {
        let n = component_system.n_comp();
        Self {
            is_kinetic: true,
            adsorption_rate: DVector::zeros(n),
            desorption_rate: DVector::zeros(n),
            capacity: DVector::zeros(n),
        }
    }

    /// Equilibrium constants $K_i = k_{a,i}/k_{d,i}$
    ///
    /// Species with $k_d = 0$ are reported as infinitely retained.
    pub fn equilibrium_constant(&self) -> DVector<f64> {
        self.adsorption_rate
            .zip_map(&self.desorption_rate, |ka, kd| {
                if kd == 0.0 { f64::INFINITY } else { ka / kd }
            })
    }

    pub fn validate(&self, component_system: &ComponentSystem) -> Result<(), ModelError> {
        let arrays = [
            ("adsorption_rate", &self.adsorption_rate),
            ("desorption_rate", &self.desorption_rate),
            ("capacity", &self.capacity),
        ];

        for (name, values) in arrays {
            component_system.check_len(name, values)?;
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ModelError::invalid(name, "entries must be finite and >= 0"));
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Binding model
// =================================================================================================

/// Binding model attached to a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BindingModel {
    StericMassAction(StericMassAction),
    Langmuir(Langmuir),
}

impl BindingModel {
    /// Model name as understood by the simulator
    pub fn name(&self) -> &str {
        match self {
            BindingModel::StericMassAction(_) => "STERIC_MASS_ACTION",
            BindingModel::Langmuir(_) => "MULTI_COMPONENT_LANGMUIR",
        }
    }

    pub fn is_kinetic(&self) -> bool {
        match self {
            BindingModel::StericMassAction(model) => model.is_kinetic,
            BindingModel::Langmuir(model) => model.is_kinetic,
        }
    }

    pub fn validate(&self, component_system: &ComponentSystem) -> Result<(), ModelError> {
        match self {
            BindingModel::StericMassAction(model) => model.validate(component_system),
            BindingModel::Langmuir(model) => model.validate(component_system),
        }
    }
}

impl From<StericMassAction> for BindingModel {
    fn from(model: StericMassAction) -> Self {
        BindingModel::StericMassAction(model)
    }
}

impl From<Langmuir> for BindingModel {
    fn from(model: Langmuir) -> Self {
        BindingModel::Langmuir(model)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn salt_protein() -> ComponentSystem {
        ComponentSystem::new(["Salt", "Protein"])
    }

    #[test]
    fn test_new_sma_is_valid() {
        let system = salt_protein();
        let model = StericMassAction::new(&system);

        assert_eq!(model.adsorption_rate.len(), 2);
        assert!(model.validate(&system).is_ok());
    }

    #[test]
    fn test_sma_shape_mismatch() {
        let system = salt_protein();
        let mut model = StericMassAction::new(&system);
        model.steric_factor = DVector::from_vec(vec![0.0, 50.0, 50.0]);

        let err = model.validate(&system).unwrap_err();
        assert_eq!(err, ModelError::shape("steric_factor", 2, 3));
    }

    #[test]
    fn test_sma_negative_capacity() {
        let system = salt_protein();
        let mut model = StericMassAction::new(&system);
        model.capacity = -1.0;

        assert!(matches!(
            model.validate(&system),
            Err(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_langmuir_equilibrium_constant() {
        let system = salt_protein();
        let mut model = Langmuir::new(&system);
        model.adsorption_rate = DVector::from_vec(vec![2.0, 1.0]);
        model.desorption_rate = DVector::from_vec(vec![1.0, 0.0]);

        let k = model.equilibrium_constant();
        assert_eq!(k[0], 2.0);
        assert!(k[1].is_infinite());
    }

    #[test]
    fn test_binding_model_dispatch() {
        let system = salt_protein();
        let mut sma = StericMassAction::new(&system);
        sma.is_kinetic = false;

        let model: BindingModel = sma.into();
        assert_eq!(model.name(), "STERIC_MASS_ACTION");
        assert!(!model.is_kinetic());
        assert!(model.validate(&system).is_ok());

        let model: BindingModel = Langmuir::new(&system).into();
        assert_eq!(model.name(), "MULTI_COMPONENT_LANGMUIR");
        assert!(model.is_kinetic());
    }
}
