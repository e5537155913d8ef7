//! Lab calibration
//!
//! Every number the process builders put into a model comes from a
//! [`Calibration`]. The default calibration holds the values measured for
//! the 20 cm × 0.5 cm POROS XS column on the ÄKTA system; other setups can be
//! described in a TOML file with the same layout:
//!
//! ```toml
//! [flow]
//! velocity_cm_h = 300.0
//!
//! [column]
//! bed_porosity = 0.58
//!
//! [schedule]
//! cycle_time_factor = 2.0
//! ```
//!
//! Missing sections and keys keep their default values.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::units;

// =================================================================================================
// Sections
// =================================================================================================

/// System flow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowCalibration {
    /// Linear flow velocity \[cm/h\]
    pub velocity_cm_h: f64,
    /// Column radius used to convert velocity to volumetric flow \[cm\]
    pub radius_cm: f64,
}

impl Default for FlowCalibration {
    fn default() -> Self {
        Self {
            velocity_cm_h: units::Q_CMH,
            radius_cm: units::COLUMN_RADIUS_CM,
        }
    }
}

/// Packed bed and transport parameters shared by both column variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnCalibration {
    /// Interstitial porosity, measured analytically
    pub bed_porosity: f64,
    /// Intra-particle porosity, measured analytically
    pub particle_porosity: f64,
    /// \[m\]
    pub particle_radius: f64,
    /// Film diffusion per species \[m/s\]
    pub film_diffusion: Vec<f64>,
    /// \[m\]
    pub length: f64,
    /// \[m\]
    pub diameter: f64,
    /// Axial dispersion from the van Deemter fit \[m²/s\]
    pub axial_dispersion: f64,
    /// Carrier salt concentration in the running buffer \[mol/m³\]
    pub salt_concentration: f64,
    /// Pore accessibility per species for size-exclusion runs
    pub pore_accessibility: Vec<f64>,
}

impl Default for ColumnCalibration {
    fn default() -> Self {
        Self {
            bed_porosity: 0.60,
            particle_porosity: 0.65,
            particle_radius: 50.0 * 1e-06,
            film_diffusion: vec![1e-04, 2.11618851e0, 2.11618851e0],
            length: 0.2,
            diameter: 0.005,
            axial_dispersion: 3.420580134283602e-07,
            salt_concentration: 10.0,
            pore_accessibility: vec![1.0, 1.0, 0.01],
        }
    }
}

/// Steric Mass Action parameters for a salt + protein pair
///
/// Index 0 is the salt, index 1 the protein. Builders apply the protein
/// entry to every species after the salt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingCalibration {
    pub is_kinetic: bool,
    pub adsorption_rate: [f64; 2],
    pub desorption_rate: [f64; 2],
    /// Ionic capacity \[mol/m³\]
    pub capacity: f64,
    pub steric_factor: [f64; 2],
    pub characteristic_charge: [f64; 2],
}

impl Default for BindingCalibration {
    fn default() -> Self {
        Self {
            is_kinetic: false,
            adsorption_rate: [1.0, 1e4],
            desorption_rate: [1.0, 1.0],
            capacity: 102.54,
            steric_factor: [0.0, 50.0],
            characteristic_charge: [1.0, 11.5],
        }
    }
}

/// Tracer and sample measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerCalibration {
    /// \[m³\]
    pub volume: f64,
    /// \[g/L\]
    pub mass_concentration: f64,
    /// \[g/mol\]
    pub molar_mass: f64,
}

impl Default for TracerCalibration {
    fn default() -> Self {
        Self {
            volume: units::V_TRACER,
            mass_concentration: units::SAMPLE_MASS_CONCENTRATION,
            molar_mass: units::SAMPLE_MOLAR_MASS,
        }
    }
}

/// Isocratic schedule shape, in column volumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleCalibration {
    /// Cycle length in column volumes
    pub cycle_time_factor: f64,
    /// Injection length in column volumes
    pub injection_fraction: f64,
}

impl Default for ScheduleCalibration {
    fn default() -> Self {
        Self {
            cycle_time_factor: 1.5,
            injection_fraction: 0.05,
        }
    }
}

// =================================================================================================
// Calibration
// =================================================================================================

/// Complete set of lab parameters used by the builders in [`crate::akta`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub flow: FlowCalibration,
    pub column: ColumnCalibration,
    pub binding: BindingCalibration,
    pub tracer: TracerCalibration,
    pub schedule: ScheduleCalibration,
}

impl Calibration {
    /// Load and validate a calibration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let calibration: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        calibration.validate()?;

        log::debug!("Loaded calibration from {}", path.display());
        Ok(calibration)
    }

    /// Parse and validate a calibration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let calibration: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Volumetric flow rate \[m³/s\]
    pub fn flow_rate(&self) -> f64 {
        units::ml_min_to_m3_s(units::cm_h_to_ml_min(
            self.flow.velocity_cm_h,
            self.flow.radius_cm,
        ))
    }

    /// Sample molar concentration \[mol/L\]
    pub fn sample_concentration(&self) -> f64 {
        self.tracer.mass_concentration / self.tracer.molar_mass
    }

    /// Check ranges of every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("flow.velocity_cm_h", self.flow.velocity_cm_h),
            ("flow.radius_cm", self.flow.radius_cm),
            ("column.particle_radius", self.column.particle_radius),
            ("column.length", self.column.length),
            ("column.diameter", self.column.diameter),
            ("tracer.volume", self.tracer.volume),
            ("tracer.molar_mass", self.tracer.molar_mass),
            ("schedule.cycle_time_factor", self.schedule.cycle_time_factor),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }

        for (name, value) in [
            ("column.bed_porosity", self.column.bed_porosity),
            ("column.particle_porosity", self.column.particle_porosity),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::Invalid(format!("{name} must be in ]0,1[, got {value}")));
            }
        }

        if self.column.film_diffusion.len() != self.column.pore_accessibility.len() {
            return Err(ConfigError::Invalid(format!(
                "column.film_diffusion has {} entries but column.pore_accessibility has {}",
                self.column.film_diffusion.len(),
                self.column.pore_accessibility.len()
            )));
        }

        let fraction = self.schedule.injection_fraction;
        if !(fraction >= 0.0 && fraction < self.schedule.cycle_time_factor) {
            return Err(ConfigError::Invalid(format!(
                "schedule.injection_fraction must be in [0, cycle_time_factor[, got {fraction}"
            )));
        }

        Ok(())
    }
}
