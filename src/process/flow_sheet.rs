//! Flow sheet
//!
//! Directed network of unit operations. Units are moved into the flow sheet
//! when added and are addressed by name afterwards; connections are directed
//! edges between two unit names.
//!
//! # Example
//!
//! ```rust
//! use chrom_process::component::ComponentSystem;
//! use chrom_process::models::{Inlet, Outlet};
//! use chrom_process::process::FlowSheet;
//!
//! let system = ComponentSystem::with_count(2);
//! let mut flow_sheet = FlowSheet::new(&system);
//! flow_sheet.add_unit(Inlet::new(&system, "inlet")).unwrap();
//! flow_sheet.add_unit(Outlet::new(&system, "outlet")).unwrap();
//! flow_sheet.add_connection("inlet", "outlet").unwrap();
//!
//! assert_eq!(flow_sheet.n_units(), 2);
//! assert!(flow_sheet.has_connection("inlet", "outlet"));
//! ```

use serde::{Deserialize, Serialize};

use crate::component::ComponentSystem;
use crate::error::ModelError;
use crate::models::{Inlet, LumpedRateModelWithPores, Outlet, UnitOperation};

/// Directed edge between two units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub origin: String,
    pub destination: String,
}

/// Network of unit operations
///
/// Deserialization replays [`add_unit`](Self::add_unit) and
/// [`add_connection`](Self::add_connection), so a document breaking their
/// rules is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FlowSheetDocument")]
pub struct FlowSheet {
    component_system: ComponentSystem,
    units: Vec<UnitOperation>,
    connections: Vec<Connection>,
}

#[derive(Deserialize)]
struct FlowSheetDocument {
    component_system: ComponentSystem,
    units: Vec<UnitOperation>,
    connections: Vec<Connection>,
}

impl TryFrom<FlowSheetDocument> for FlowSheet {
    type Error = ModelError;

    fn try_from(document: FlowSheetDocument) -> Result<Self, Self::Error> {
        let mut flow_sheet = FlowSheet::new(&document.component_system);
        for unit in document.units {
            flow_sheet.add_unit(unit)?;
        }
        for connection in &document.connections {
            flow_sheet.add_connection(&connection.origin, &connection.destination)?;
        }
        Ok(flow_sheet)
    }
}

impl FlowSheet {
    /// Create an empty flow sheet
    pub fn new(component_system: &ComponentSystem) -> Self {
        Self {
            component_system: component_system.clone(),
            units: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn component_system(&self) -> &ComponentSystem {
        &self.component_system
    }

    // ===================================== Construction ==========================================

    /// Add a unit, taking ownership of it
    ///
    /// # Errors
    ///
    /// - a unit with the same name already exists
    /// - the unit works on a different component system
    pub fn add_unit(&mut self, unit: impl Into<UnitOperation>) -> Result<(), ModelError> {
        let unit = unit.into();

        if self.unit(unit.name()).is_some() {
            return Err(ModelError::DuplicateUnit(unit.name().to_string()));
        }

        if unit.component_system() != &self.component_system {
            return Err(ModelError::invalid(
                unit.name(),
                format!(
                    "unit uses {} but flow sheet uses {}",
                    unit.component_system(),
                    self.component_system
                ),
            ));
        }

        log::debug!("Adding unit '{}' to flow sheet", unit.name());
        self.units.push(unit);
        Ok(())
    }

    /// Connect two units already in the flow sheet
    ///
    /// # Errors
    ///
    /// - either unit is unknown
    /// - origin and destination are the same unit
    /// - the origin is an outlet or the destination is an inlet
    /// - the connection already exists
    pub fn add_connection(&mut self, origin: &str, destination: &str) -> Result<(), ModelError> {
        let invalid = |reason: &str| ModelError::InvalidConnection {
            origin: origin.to_string(),
            destination: destination.to_string(),
            reason: reason.to_string(),
        };

        let origin_unit = self
            .unit(origin)
            .ok_or_else(|| ModelError::UnknownUnit(origin.to_string()))?;
        let destination_unit = self
            .unit(destination)
            .ok_or_else(|| ModelError::UnknownUnit(destination.to_string()))?;

        if origin == destination {
            return Err(invalid("a unit cannot feed itself"));
        }
        if origin_unit.is_outlet() {
            return Err(invalid("an outlet has no outgoing stream"));
        }
        if destination_unit.is_inlet() {
            return Err(invalid("an inlet has no incoming stream"));
        }
        if self.has_connection(origin, destination) {
            return Err(invalid("connection already exists"));
        }

        log::debug!("Connecting '{origin}' -> '{destination}'");
        self.connections.push(Connection {
            origin: origin.to_string(),
            destination: destination.to_string(),
        });
        Ok(())
    }

    // ======================================== Queries ============================================

    pub fn units(&self) -> &[UnitOperation] {
        &self.units
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn n_units(&self) -> usize {
        self.units.len()
    }

    /// Get a unit by name
    pub fn unit(&self, name: &str) -> Option<&UnitOperation> {
        self.units.iter().find(|unit| unit.name() == name)
    }

    /// Get a mutable unit by name
    pub fn unit_mut(&mut self, name: &str) -> Option<&mut UnitOperation> {
        self.units.iter_mut().find(|unit| unit.name() == name)
    }

    pub fn has_connection(&self, origin: &str, destination: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.origin == origin && c.destination == destination)
    }

    /// First inlet of the flow sheet
    pub fn inlet(&self) -> Option<&Inlet> {
        self.units.iter().find_map(|unit| match unit {
            UnitOperation::Inlet(inlet) => Some(inlet),
            _ => None,
        })
    }

    /// First column of the flow sheet
    pub fn column(&self) -> Option<&LumpedRateModelWithPores> {
        self.units.iter().find_map(|unit| match unit {
            UnitOperation::Column(column) => Some(column),
            _ => None,
        })
    }

    /// First outlet of the flow sheet
    pub fn outlet(&self) -> Option<&Outlet> {
        self.units.iter().find_map(|unit| match unit {
            UnitOperation::Outlet(outlet) => Some(outlet),
            _ => None,
        })
    }

    /// Validate every unit's own parameters
    pub fn validate(&self) -> Result<(), ModelError> {
        self.units.iter().try_for_each(UnitOperation::validate)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
