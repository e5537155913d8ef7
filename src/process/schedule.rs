//! Process: a flow sheet with a timed event schedule
//!
//! A process is "WHAT the simulator runs": the flow sheet gives the
//! topology and initial parameters, the events change parameters over one
//! cycle of length `cycle_time`.
//!
//! # Schedule invariants
//!
//! - every event time is in `[0, cycle_time)`
//! - event times are non-decreasing in insertion order
//! - event names are unique
//! - an event value has the length of the parameter it targets
//!
//! # Example
//!
//! ```rust
//! use chrom_process::component::ComponentSystem;
//! use chrom_process::models::{Inlet, Outlet};
//! use chrom_process::process::{FlowSheet, Process};
//! use nalgebra::DVector;
//!
//! let system = ComponentSystem::with_count(1);
//! let mut flow_sheet = FlowSheet::new(&system);
//! flow_sheet.add_unit(Inlet::new(&system, "inlet")).unwrap();
//! flow_sheet.add_unit(Outlet::new(&system, "outlet")).unwrap();
//! flow_sheet.add_connection("inlet", "outlet").unwrap();
//!
//! let mut process = Process::new(flow_sheet, "pulse");
//! process.set_cycle_time(60.0).unwrap();
//! process.add_event("load", "flow_sheet.inlet.c", DVector::from_vec(vec![1.0]), 0.0).unwrap();
//! process.add_event("wash", "flow_sheet.inlet.c", DVector::from_vec(vec![0.0]), 10.0).unwrap();
//!
//! assert_eq!(process.section_times(), vec![0.0, 10.0, 60.0]);
//! ```

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::UnitParameter;
use crate::process::event::{Event, ParameterPath};
use crate::process::flow_sheet::FlowSheet;

/// Flow sheet plus event schedule over one cycle
///
/// Deserialization replays [`set_cycle_time`](Self::set_cycle_time) and
/// [`add_event`](Self::add_event), so an imported schedule obeys the same
/// invariants as a built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProcessDocument")]
pub struct Process {
    pub name: String,
    flow_sheet: FlowSheet,
    /// \[s\]
    cycle_time: f64,
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct ProcessDocument {
    name: String,
    flow_sheet: FlowSheet,
    cycle_time: f64,
    events: Vec<Event>,
}

impl TryFrom<ProcessDocument> for Process {
    type Error = ModelError;

    fn try_from(document: ProcessDocument) -> Result<Self, Self::Error> {
        let mut process = Process::new(document.flow_sheet, document.name);
        // A zero cycle time is the unset state of a new process
        if document.cycle_time != 0.0 {
            process.set_cycle_time(document.cycle_time)?;
        }
        for event in document.events {
            if process.event(&event.name).is_some() {
                return Err(ModelError::DuplicateEvent(event.name));
            }
            process.check_event(&event, process.events.last())?;
            process.events.push(event);
        }
        Ok(process)
    }
}

impl Process {
    /// Create a process with no events and no cycle time
    ///
    /// The cycle time must be set before events can be added.
    pub fn new(flow_sheet: FlowSheet, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flow_sheet,
            cycle_time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn flow_sheet(&self) -> &FlowSheet {
        &self.flow_sheet
    }

    pub fn cycle_time(&self) -> f64 {
        self.cycle_time
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get an event by name
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.name == name)
    }

    /// Set the cycle duration \[s\]
    ///
    /// # Errors
    ///
    /// The cycle time must be positive and finite, and strictly greater than
    /// the time of every event already scheduled.
    pub fn set_cycle_time(&mut self, cycle_time: f64) -> Result<(), ModelError> {
        if !(cycle_time > 0.0 && cycle_time.is_finite()) {
            return Err(ModelError::invalid(
                "cycle_time",
                format!("must be > 0, got {cycle_time}"),
            ));
        }

        if let Some(last) = self.events.last() {
            if last.time >= cycle_time {
                return Err(ModelError::invalid(
                    "cycle_time",
                    format!(
                        "event '{}' at t = {} s would fall outside a {cycle_time} s cycle",
                        last.name, last.time
                    ),
                ));
            }
        }

        self.cycle_time = cycle_time;
        Ok(())
    }

    /// Append an event to the schedule
    ///
    /// # Arguments
    ///
    /// * `name` - Unique event name
    /// * `path` - Target parameter, `flow_sheet.<unit>.<parameter>`
    /// * `state` - New value of the parameter
    /// * `time` - Event time from cycle start \[s\]
    pub fn add_event(
        &mut self,
        name: &str,
        path: &str,
        state: DVector<f64>,
        time: f64,
    ) -> Result<(), ModelError> {
        if self.event(name).is_some() {
            return Err(ModelError::DuplicateEvent(name.to_string()));
        }

        let event = Event {
            name: name.to_string(),
            path: path.parse()?,
            state,
            time,
        };
        self.check_event(&event, self.events.last())?;

        if self.parameter_at(&event.path, time)? == event.state {
            log::warn!(
                "Event '{name}' sets {} to the value it already has at t = {time} s",
                event.path
            );
        }

        log::debug!("Scheduling event '{name}': {} at t = {time} s", event.path);
        self.events.push(event);
        Ok(())
    }

    // ======================================== Queries ============================================

    /// Event times in schedule order
    pub fn event_times(&self) -> Vec<f64> {
        self.events.iter().map(|event| event.time).collect()
    }

    /// Boundaries of the piecewise-constant sections of the cycle
    ///
    /// Starts at 0, contains every distinct event time, ends at the cycle time.
    pub fn section_times(&self) -> Vec<f64> {
        let mut times = vec![0.0];
        for event in &self.events {
            if times.last().is_some_and(|last| event.time > *last) {
                times.push(event.time);
            }
        }
        if self.cycle_time > 0.0 {
            times.push(self.cycle_time);
        }
        times
    }

    /// Value of a parameter at time `t` of the cycle
    ///
    /// Starts from the flow sheet value and applies every event on `path`
    /// scheduled at or before `t`.
    pub fn parameter_at(&self, path: &ParameterPath, t: f64) -> Result<DVector<f64>, ModelError> {
        let initial = self.initial_value(path)?;

        Ok(self
            .events
            .iter()
            .rev()
            .find(|event| &event.path == path && event.time <= t)
            .map(|event| event.state.clone())
            .unwrap_or(initial))
    }

    /// Evaluate a parameter at several times
    pub fn evaluate_series(
        &self,
        path: &ParameterPath,
        times: &[f64],
    ) -> Result<Vec<DVector<f64>>, ModelError> {
        times.iter().map(|&t| self.parameter_at(path, t)).collect()
    }

    /// Inlet concentration at several times
    pub fn inlet_profile(&self, times: &[f64]) -> Result<Vec<DVector<f64>>, ModelError> {
        let inlet = self
            .flow_sheet
            .inlet()
            .ok_or(ModelError::MissingUnit("inlet"))?;
        let path = ParameterPath::new(inlet.name.clone(), UnitParameter::Concentration);
        self.evaluate_series(&path, times)
    }

    /// Validate the flow sheet, the cycle time and every scheduled event
    pub fn validate(&self) -> Result<(), ModelError> {
        self.flow_sheet.validate()?;
        if !(self.cycle_time > 0.0) {
            return Err(ModelError::invalid("cycle_time", "cycle time is not set"));
        }

        for (i, event) in self.events.iter().enumerate() {
            if self.events[..i].iter().any(|other| other.name == event.name) {
                return Err(ModelError::DuplicateEvent(event.name.clone()));
            }
            self.check_event(event, i.checked_sub(1).map(|j| &self.events[j]))?;
        }
        Ok(())
    }

    /// Target, value and time of `event` against the flow sheet, the cycle
    /// and the event scheduled before it
    fn check_event(&self, event: &Event, previous: Option<&Event>) -> Result<(), ModelError> {
        let path = event.path.to_string();
        let current = self.initial_value(&event.path)?;

        if event.state.len() != current.len() {
            return Err(ModelError::shape(&path, current.len(), event.state.len()));
        }
        if event.state.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::invalid(&path, "values must be finite"));
        }

        let time_error = |reason: String| ModelError::EventTime {
            name: event.name.clone(),
            time: event.time,
            reason,
        };

        if !(event.time >= 0.0 && event.time < self.cycle_time) {
            return Err(time_error(format!("must be in [0, {}) s", self.cycle_time)));
        }
        if let Some(previous) = previous {
            if event.time < previous.time {
                return Err(time_error(format!(
                    "scheduled before previous event '{}' at t = {} s",
                    previous.name, previous.time
                )));
            }
        }
        Ok(())
    }

    fn initial_value(&self, path: &ParameterPath) -> Result<DVector<f64>, ModelError> {
        let unit = self
            .flow_sheet
            .unit(&path.unit)
            .ok_or_else(|| ModelError::UnknownUnit(path.unit.clone()))?;

        unit.parameter(path.parameter)
            .ok_or_else(|| ModelError::InvalidPath {
                path: path.to_string(),
                reason: format!("unit '{}' has no parameter '{}'", path.unit, path.parameter),
            })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentSystem;
    use crate::models::{Inlet, Outlet};

    fn bypass_process() -> Process {
        let system = ComponentSystem::with_count(2);
        let mut flow_sheet = FlowSheet::new(&system);
        let mut inlet = Inlet::new(&system, "inlet");
        inlet.flow_rate = 1e-8;
        flow_sheet.add_unit(inlet).unwrap();
        flow_sheet.add_unit(Outlet::new(&system, "outlet")).unwrap();
        flow_sheet.add_connection("inlet", "outlet").unwrap();

        let mut process = Process::new(flow_sheet, "test");
        process.set_cycle_time(100.0).unwrap();
        process
    }

    fn c(values: &[f64]) -> DVector<f64> {
        DVector::from_row_slice(values)
    }

    #[test]
    fn test_events_require_cycle_time() {
        let mut process = bypass_process();
        process.cycle_time = 0.0;

        let err = process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 1.0]), 0.0)
            .unwrap_err();
        assert!(matches!(err, ModelError::EventTime { .. }));
    }

    #[test]
    fn test_event_time_bounds() {
        let mut process = bypass_process();

        assert!(process
            .add_event("late", "flow_sheet.inlet.c", c(&[1.0, 1.0]), 100.0)
            .is_err());
        assert!(process
            .add_event("negative", "flow_sheet.inlet.c", c(&[1.0, 1.0]), -1.0)
            .is_err());
        assert!(process.events().is_empty());
    }

    #[test]
    fn test_event_order_enforced() {
        let mut process = bypass_process();
        process
            .add_event("wash", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 20.0)
            .unwrap();

        let err = process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 1.0]), 10.0)
            .unwrap_err();
        assert!(matches!(err, ModelError::EventTime { .. }));

        // Same time is allowed
        process
            .add_event("flow", "flow_sheet.inlet.flow_rate", c(&[2e-8]), 20.0)
            .unwrap();
        assert_eq!(process.event_times(), vec![20.0, 20.0]);
    }

    #[test]
    fn test_duplicate_event_name() {
        let mut process = bypass_process();
        process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 1.0]), 0.0)
            .unwrap();

        assert_eq!(
            process.add_event("load", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 5.0),
            Err(ModelError::DuplicateEvent("load".to_string()))
        );
    }

    #[test]
    fn test_event_shape_and_target() {
        let mut process = bypass_process();

        assert_eq!(
            process.add_event("load", "flow_sheet.inlet.c", c(&[1.0]), 0.0),
            Err(ModelError::shape("flow_sheet.inlet.c", 2, 1))
        );
        assert_eq!(
            process.add_event("load", "flow_sheet.column.c", c(&[1.0, 1.0]), 0.0),
            Err(ModelError::UnknownUnit("column".to_string()))
        );
        assert!(matches!(
            process.add_event("load", "flow_sheet.outlet.c", c(&[1.0, 1.0]), 0.0),
            Err(ModelError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_cycle_time_must_cover_events() {
        let mut process = bypass_process();
        process
            .add_event("wash", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 50.0)
            .unwrap();

        assert!(process.set_cycle_time(50.0).is_err());
        assert!(process.set_cycle_time(-1.0).is_err());
        assert!(process.set_cycle_time(60.0).is_ok());
        assert_eq!(process.cycle_time(), 60.0);
    }

    #[test]
    fn test_parameter_at() {
        let mut process = bypass_process();
        process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 2.0]), 0.0)
            .unwrap();
        process
            .add_event("wash", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 10.0)
            .unwrap();

        let path = ParameterPath::new("inlet", UnitParameter::Concentration);
        assert_eq!(process.parameter_at(&path, 0.0).unwrap(), c(&[1.0, 2.0]));
        assert_eq!(process.parameter_at(&path, 9.999).unwrap(), c(&[1.0, 2.0]));
        assert_eq!(process.parameter_at(&path, 10.0).unwrap(), c(&[0.0, 0.0]));

        // Untouched parameter keeps its flow sheet value
        let flow = ParameterPath::new("inlet", UnitParameter::FlowRate);
        assert_eq!(process.parameter_at(&flow, 50.0).unwrap(), c(&[1e-8]));
    }

    #[test]
    fn test_section_times() {
        let mut process = bypass_process();
        assert_eq!(process.section_times(), vec![0.0, 100.0]);

        process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 2.0]), 0.0)
            .unwrap();
        process
            .add_event("wash", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 10.0)
            .unwrap();
        process
            .add_event("flow", "flow_sheet.inlet.flow_rate", c(&[2e-8]), 10.0)
            .unwrap();

        assert_eq!(process.section_times(), vec![0.0, 10.0, 100.0]);
    }

    #[test]
    fn test_inlet_profile() {
        let mut process = bypass_process();
        process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 2.0]), 5.0)
            .unwrap();

        let profile = process.inlet_profile(&[0.0, 5.0, 50.0]).unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile[0], c(&[0.0, 0.0]));
        assert_eq!(profile[1], c(&[1.0, 2.0]));
        assert_eq!(profile[2], c(&[1.0, 2.0]));
    }

    #[test]
    fn test_validate() {
        let process = bypass_process();
        assert!(process.validate().is_ok());

        let unset = Process::new(process.flow_sheet().clone(), "unset");
        assert!(unset.validate().is_err());
    }

    #[test]
    fn test_validate_rechecks_events() {
        let mut process = bypass_process();
        process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 2.0]), 0.0)
            .unwrap();
        process
            .add_event("wash", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 10.0)
            .unwrap();
        assert!(process.validate().is_ok());

        let mut reordered = process.clone();
        reordered.events[0].time = 50.0;
        assert!(matches!(reordered.validate(), Err(ModelError::EventTime { .. })));

        let mut renamed = process.clone();
        renamed.events[1].name = "load".to_string();
        assert_eq!(renamed.validate(), Err(ModelError::DuplicateEvent("load".to_string())));

        let mut retargeted = process;
        retargeted.events[1].path = "flow_sheet.ghost.c".parse().unwrap();
        assert_eq!(retargeted.validate(), Err(ModelError::UnknownUnit("ghost".to_string())));
    }

    #[test]
    fn test_document_replays_schedule() {
        let mut process = bypass_process();
        process
            .add_event("load", "flow_sheet.inlet.c", c(&[1.0, 2.0]), 0.0)
            .unwrap();
        process
            .add_event("wash", "flow_sheet.inlet.c", c(&[0.0, 0.0]), 10.0)
            .unwrap();

        let document = serde_json::to_value(&process).unwrap();
        let restored: Process = serde_json::from_value(document.clone()).unwrap();
        assert_eq!(restored, process);

        let mut late = document.clone();
        late["events"][1]["time"] = serde_json::json!(100.0);
        assert!(serde_json::from_value::<Process>(late).is_err());

        let mut reversed = document;
        reversed["events"][0]["time"] = serde_json::json!(20.0);
        let err = serde_json::from_value::<Process>(reversed).unwrap_err();
        assert!(err.to_string().contains("scheduled before previous event 'load'"));
    }

    #[test]
    fn test_unset_process_document() {
        let process = Process::new(bypass_process().flow_sheet().clone(), "unset");

        let document = serde_json::to_value(&process).unwrap();
        let restored: Process = serde_json::from_value(document).unwrap();
        assert_eq!(restored.cycle_time(), 0.0);
        assert!(restored.events().is_empty());
    }
}
