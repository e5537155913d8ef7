//! Export module for assembled processes.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module     | Content                                        |
//! |---------|------------|------------------------------------------------|
//! | JSON    | [`json`]   | Whole process: units, connections, events      |
//! | CSV     | [`csv`]    | Event schedule as a table, one row per event   |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use chrom_process::akta;
//! use chrom_process::component::ComponentSystem;
//! use chrom_process::output::export::{CsvExporter, Exporter, JsonExporter};
//! use std::path::Path;
//!
//! let system = ComponentSystem::new(["Salt", "mAb", "Aggregate"]);
//! let column = akta::adsorptive_column(&system).unwrap();
//! let flow_sheet = akta::akta_flow_sheet(&system, Some(column)).unwrap();
//! let process = akta::isocratic_process(flow_sheet).unwrap();
//!
//! JsonExporter::default().export(&process, Path::new("process.json")).unwrap();
//! CsvExporter::default().export(&process, Path::new("events.csv")).unwrap();
//! ```

pub mod csv;
pub mod json;

pub use self::csv::CsvExporter;
pub use self::json::JsonExporter;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::process::Process;

/// Errors raised while exporting a process
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Process '{0}' has no events to export")]
    EmptySchedule(String),
}

/// Abstraction trait for all export formats.
///
/// Implementors write to any [`Write`]; [`export`](Exporter::export) opens
/// the file and delegates.
pub trait Exporter {
    /// Writes `process` to `writer`.
    fn write<W: Write>(&self, process: &Process, writer: W) -> Result<(), ExportError>;

    /// Writes `process` to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - the format cannot represent the process
    fn export(&self, process: &Process, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|e| ExportError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        self.write(process, BufWriter::new(file))?;
        log::debug!("Exported process '{}' to {}", process.name, path.display());
        Ok(())
    }
}
