//! Helper functions for integration tests

use chrom_process::akta;
use chrom_process::component::ComponentSystem;
use chrom_process::process::Process;
use nalgebra::DVector;

/// Salt, monomer and aggregate, the species of the ÄKTA runs
pub fn three_species() -> ComponentSystem {
    ComponentSystem::new(["Salt", "Monomer", "Aggregate"])
}

/// Adsorptive column, full flow sheet and isocratic schedule
pub fn isocratic_setup() -> Process {
    let system = three_species();
    let column = akta::adsorptive_column(&system).unwrap();
    let flow_sheet = akta::akta_flow_sheet(&system, Some(column)).unwrap();
    akta::isocratic_process(flow_sheet).unwrap()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Assert that two vectors agree entry by entry within a relative tolerance
pub fn assert_vectors_close(
    actual: &DVector<f64>,
    expected: &[f64],
    tolerance: f64,
    message: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let error = relative_error(a, e);
        assert!(
            error < tolerance,
            "{}: Element {} is {} instead of {} (relative error {})",
            message, i, a, e, error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
