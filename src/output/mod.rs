//! Output module for assembled processes
//!
//! Hands a [`Process`](crate::process::Process) to tools outside the crate:
//!
//! - **JSON**: complete object graph, for simulator front-ends
//! - **CSV**: the event schedule, for lab notebooks and spreadsheets
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait, ExportError
//!     ├── json.rs
//!     └── csv.rs
//! ```

pub mod export;

// Re-export commonly used items for convenience
pub use export::{CsvExporter, ExportError, Exporter, JsonExporter};
