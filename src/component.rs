//! Component system
//!
//! Ordered list of the chemical species present in a process. Every
//! per-species array in the crate (binding rates, diffusion coefficients,
//! concentrations, pore accessibility) is indexed by the position of the
//! species in this list, and must have exactly [`ComponentSystem::n_comp`]
//! entries.
//!
//! # Example
//!
//! ```rust
//! use chrom_process::component::ComponentSystem;
//!
//! let system = ComponentSystem::new(["Salt", "Protein", "Aggregate"]);
//! assert_eq!(system.n_comp(), 3);
//! assert_eq!(system.index_of("Protein"), Some(1));
//! ```

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;

/// Ordered set of species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSystem {
    names: Vec<String>,
}

impl ComponentSystem {
    /// Create a component system from species names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create `n` anonymous species named `"0"`, `"1"`, ...
    pub fn with_count(n: usize) -> Self {
        Self::new((0..n).map(|i| i.to_string()))
    }

    /// Number of species
    pub fn n_comp(&self) -> usize {
        self.names.len()
    }

    /// Species names in index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a species by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Check that a per-species array has one entry per species
    pub fn check_len(&self, parameter: &str, values: &DVector<f64>) -> Result<(), ModelError> {
        if values.len() != self.n_comp() {
            return Err(ModelError::shape(parameter, self.n_comp(), values.len()));
        }
        Ok(())
    }
}

impl fmt::Display for ComponentSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentSystem [{}]", self.names.join(", "))
    }
}

/// Serialize a per-species [`DVector`] as a plain sequence of numbers
///
/// Use with `#[serde(with = "crate::component::species_vector")]`.
pub(crate) mod species_vector {
    use nalgebra::DVector;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(values: &DVector<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        values.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DVector<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<f64>::deserialize(deserializer).map(DVector::from_vec)
    }

    /// Same layout for optional arrays, `null` when absent
    pub mod option {
        use nalgebra::DVector;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S: Serializer>(
            values: &Option<DVector<f64>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            values.as_ref().map(|v| v.as_slice()).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DVector<f64>>, D::Error> {
            Option::<Vec<f64>>::deserialize(deserializer).map(|v| v.map(DVector::from_vec))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "species_vector")]
        c: DVector<f64>,
        #[serde(with = "species_vector::option", default)]
        q: Option<DVector<f64>>,
    }

    #[test]
    fn test_with_count() {
        let system = ComponentSystem::with_count(3);
        assert_eq!(system.n_comp(), 3);
        assert_eq!(system.names(), &["0", "1", "2"]);
    }

    #[test]
    fn test_check_len() {
        let system = ComponentSystem::new(["Salt", "Protein"]);

        assert!(system.check_len("c", &DVector::from_vec(vec![1.0, 0.0])).is_ok());

        let err = system
            .check_len("c", &DVector::from_vec(vec![1.0, 0.0, 0.0]))
            .unwrap_err();
        assert_eq!(err, ModelError::shape("c", 2, 3));
    }

    #[test]
    fn test_species_vector_is_plain_sequence() {
        let sample = Sample {
            c: DVector::from_vec(vec![10.0, 0.0, 0.0]),
            q: None,
        };

        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value, json!({ "c": [10.0, 0.0, 0.0], "q": null }));

        let restored: Sample = serde_json::from_value(json!({ "c": [1.0, 2.0] })).unwrap();
        assert_eq!(restored.c, DVector::from_vec(vec![1.0, 2.0]));
        assert_eq!(restored.q, None);
    }

    #[test]
    fn test_display() {
        let system = ComponentSystem::new(["Salt", "Protein"]);
        assert_eq!(system.to_string(), "ComponentSystem [Salt, Protein]");
    }
}
