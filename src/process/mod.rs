//! Flow sheets and processes
//!
//! # Core Concepts
//!
//! - **Flow sheet** ([`FlowSheet`]): unit operations and the directed
//!   connections between them. Defines the topology.
//! - **Event** ([`Event`]): sets one unit parameter, addressed by a
//!   [`ParameterPath`], to a new value at a given time.
//! - **Process** ([`Process`]): a flow sheet plus an event schedule over one
//!   cycle. This is the object handed to the simulator.
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────────┐
//! │ Unit operations  │  inlet, column, outlet
//! └────────┬─────────┘
//!          │ add_unit / add_connection
//! ┌────────▼─────────┐
//! │ FlowSheet        │ ← topology
//! └────────┬─────────┘
//!          │ Process::new
//! ┌────────▼─────────┐
//! │ Process          │ ← cycle time + events
//! └────────┬─────────┘
//!          │ export
//! ┌────────▼─────────┐
//! │ Simulator input  │
//! └──────────────────┘
//! ```

pub mod event;
pub mod flow_sheet;
pub mod schedule;

pub use event::{Event, ParameterPath};
pub use flow_sheet::{Connection, FlowSheet};
pub use schedule::Process;
