//! JSON export of a complete process
//!
//! The document mirrors the object graph: process name, cycle time, flow
//! sheet (component system, units with their parameters and binding models,
//! connections) and the event schedule. Parameter paths are written as
//! `flow_sheet.<unit>.<parameter>` strings.
//!
//! The output can be read back with [`read_process`].

use std::io::{Read, Write};

use super::{ExportError, Exporter};
use crate::process::Process;

/// Writes a process as JSON
#[derive(Debug, Clone)]
pub struct JsonExporter {
    /// Indented output (default: true)
    pub pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    /// Single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Exporter for JsonExporter {
    fn write<W: Write>(&self, process: &Process, mut writer: W) -> Result<(), ExportError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, process)?;
        } else {
            serde_json::to_writer(&mut writer, process)?;
        }
        writer.flush().map_err(|e| ExportError::Io {
            path: "<writer>".to_string(),
            source: e,
        })
    }
}

/// Read a process previously written by [`JsonExporter`]
///
/// Units, connections and events are added one by one through the flow
/// sheet and process builders; a document violating their rules (unknown
/// unit, event outside the cycle, events out of order) fails with
/// [`ExportError::Json`].
pub fn read_process<R: Read>(reader: R) -> Result<Process, ExportError> {
    Ok(serde_json::from_reader(reader)?)
}
