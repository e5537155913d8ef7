//! Process events
//!
//! An event sets one unit parameter to a new value at a given time of the
//! cycle. The parameter is addressed by a [`ParameterPath`] of the form
//! `flow_sheet.<unit>.<parameter>`:
//!
//! ```rust
//! use chrom_process::process::ParameterPath;
//! use chrom_process::models::UnitParameter;
//!
//! let path: ParameterPath = "flow_sheet.inlet.c".parse().unwrap();
//! assert_eq!(path.unit, "inlet");
//! assert_eq!(path.parameter, UnitParameter::Concentration);
//! assert_eq!(path.to_string(), "flow_sheet.inlet.c");
//! ```

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::models::UnitParameter;

const ROOT: &str = "flow_sheet";

/// Address of a unit parameter inside a flow sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParameterPath {
    pub unit: String,
    pub parameter: UnitParameter,
}

impl ParameterPath {
    pub fn new(unit: impl Into<String>, parameter: UnitParameter) -> Self {
        Self {
            unit: unit.into(),
            parameter,
        }
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOT}.{}.{}", self.unit, self.parameter)
    }
}

impl FromStr for ParameterPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ModelError::InvalidPath {
            path: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split('.').collect();
        let [root, unit, parameter] = parts.as_slice() else {
            return Err(invalid(format!(
                "expected '{ROOT}.<unit>.<parameter>', got {} segment(s)",
                parts.len()
            )));
        };

        if *root != ROOT {
            return Err(invalid(format!("path must start with '{ROOT}'")));
        }
        if unit.is_empty() {
            return Err(invalid("unit name is empty".to_string()));
        }

        let parameter = parameter.parse::<UnitParameter>().map_err(invalid)?;
        Ok(Self::new(*unit, parameter))
    }
}

impl TryFrom<String> for ParameterPath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParameterPath> for String {
    fn from(path: ParameterPath) -> Self {
        path.to_string()
    }
}

/// Scheduled parameter change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub path: ParameterPath,
    /// New parameter value, one entry per species for per-species parameters
    #[serde(with = "crate::component::species_vector")]
    pub state: DVector<f64>,
    /// \[s\] from cycle start
    pub time: f64,
}
