//! Unit derivation
//!
//! Converts the linear flow velocity set on the chromatography system into
//! the SI volumetric flow rate expected by the simulator, and holds the
//! geometry and tracer constants measured in the lab.
//!
//! # Conversion chain
//!
//! ```text
//! v [cm/h] ──×(r²·π)/60──▶ Q [mL/min] ──÷(60·1e6)──▶ Q [m³/s]
//! ```
//!
//! with r = 0.25 cm the column radius. The factors are applied in this exact
//! order so the derived constants are bit-identical to the calibration
//! sheet.
//!
//! # Example
//!
//! ```rust
//! use chrom_process::units::{self, Q_M3S};
//!
//! let q = units::ml_min_to_m3_s(units::cm_h_to_ml_min(400.0, 0.25));
//! assert_eq!(q, Q_M3S);
//! ```

use std::f64::consts::PI;

// =================================================================================================
// Geometry
// =================================================================================================

/// Column radius \[cm\]
pub const COLUMN_RADIUS_CM: f64 = 0.25;

/// Column length \[cm\]
pub const COLUMN_LENGTH_CM: f64 = 20.0;

// =================================================================================================
// Flow
// =================================================================================================

/// Linear flow velocity \[cm/h\]
pub const Q_CMH: f64 = 400.0;

/// Volumetric flow rate \[mL/min\]
pub const Q_ML_MIN: f64 = Q_CMH * COLUMN_RADIUS_CM * COLUMN_RADIUS_CM * PI / 60.0;

/// Volumetric flow rate \[m³/s\]
pub const Q_M3S: f64 = Q_ML_MIN / (60.0 * 1e6);

/// Bed cylinder volume \[m³\]
pub const V_COL: f64 = COLUMN_LENGTH_CM * COLUMN_RADIUS_CM * COLUMN_RADIUS_CM * PI * 1e-6;

// =================================================================================================
// Tracer
// =================================================================================================

/// Injected tracer volume \[m³\], measured
pub const V_TRACER: f64 = 0.6e-06;

/// Sample mass concentration \[g/L\], measured
pub const SAMPLE_MASS_CONCENTRATION: f64 = 13.09;

/// Sample molar mass \[g/mol\]
pub const SAMPLE_MOLAR_MASS: f64 = 150000.0;

/// Sample molar concentration \[mol/L\]
pub const CONC_MOL_L: f64 = SAMPLE_MASS_CONCENTRATION / SAMPLE_MOLAR_MASS;

// =================================================================================================
// Conversions
// =================================================================================================

/// Linear velocity \[cm/h\] to volumetric flow \[mL/min\] through a column of radius `radius_cm`
pub fn cm_h_to_ml_min(velocity_cm_h: f64, radius_cm: f64) -> f64 {
    velocity_cm_h * radius_cm * radius_cm * PI / 60.0
}

/// Volumetric flow \[mL/min\] to \[m³/s\]
pub fn ml_min_to_m3_s(flow_ml_min: f64) -> f64 {
    flow_ml_min / (60.0 * 1e6)
}

/// Molar concentration \[mol/L\] to \[mol/m³\]
pub fn mol_l_to_mol_m3(concentration: f64) -> f64 {
    concentration * 1e3
}

/// Cylinder volume from diameter and length, both in the same length unit
pub fn cylinder_volume(diameter: f64, length: f64) -> f64 {
    (diameter * 0.5).powi(2) * length * PI
}

/// Time to push `volume` through at `flow_rate`
pub fn transit_time(volume: f64, flow_rate: f64) -> f64 {
    volume / flow_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_rate_matches_hand_computation() {
        let expected = 400.0 * (0.25 * 0.25 * PI) / 60.0 / (60.0 * 1e6);
        assert!((Q_M3S - expected).abs() < 1e-22);
        assert!((Q_M3S - 2.181661564992912e-8).abs() < 1e-18);
    }

    #[test]
    fn test_flow_rate_ml_min() {
        assert!((Q_ML_MIN - 1.3089969389957472).abs() < 1e-12);
    }

    #[test]
    fn test_helpers_agree_with_constants() {
        assert_eq!(cm_h_to_ml_min(Q_CMH, COLUMN_RADIUS_CM), Q_ML_MIN);
        assert_eq!(ml_min_to_m3_s(Q_ML_MIN), Q_M3S);
    }

    #[test]
    fn test_column_volume() {
        // 20 cm × π × (0.25 cm)² = 3.927 mL
        assert!((V_COL - 3.9269908169872417e-6).abs() < 1e-18);

        let from_si = cylinder_volume(0.005, 0.2);
        assert!((from_si - V_COL).abs() / V_COL < 1e-12);
    }

    #[test]
    fn test_tracer_concentration() {
        assert!((CONC_MOL_L - 8.726666666666667e-5).abs() < 1e-18);
        assert!((mol_l_to_mol_m3(CONC_MOL_L) - 0.08726666666666667).abs() < 1e-15);
    }

    #[test]
    fn test_transit_time() {
        let cv_time = transit_time(cylinder_volume(0.005, 0.2), Q_M3S);
        assert!((cv_time - 180.0).abs() < 1e-9);
    }
}
