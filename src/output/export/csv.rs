//! CSV export of the event schedule
//!
//! One row per event, in schedule order. Per-species values are spread over
//! one column per species; scalar parameters (flow rate, porosities) fill the
//! first species column and leave the others empty.
//!
//! **Output** for the isocratic process:
//! ```csv
//! time,event,path,Salt,Protein,Aggregate
//! 0,inject,flow_sheet.inlet.c,10,0.08726666666666667,0.08726666666666667
//! 9,elution,flow_sheet.inlet.c,10,0,0
//! ```

use std::io::Write;

use super::{ExportError, Exporter};
use crate::process::Process;

/// Writes the event schedule of a process as CSV
#[derive(Debug, Clone)]
pub struct CsvExporter {
    /// Column delimiter (default: b',')
    pub delimiter: u8,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvExporter {
    /// Semicolon-separated output
    pub fn european() -> Self {
        Self { delimiter: b';' }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Exporter for CsvExporter {
    fn write<W: Write>(&self, process: &Process, writer: W) -> Result<(), ExportError> {
        if process.events().is_empty() {
            return Err(ExportError::EmptySchedule(process.name.clone()));
        }

        let species = process.flow_sheet().component_system().names();
        let mut csv = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        let mut header = vec!["time".to_string(), "event".to_string(), "path".to_string()];
        header.extend(species.iter().cloned());
        csv.write_record(&header)?;

        for event in process.events() {
            let mut record = vec![
                event.time.to_string(),
                event.name.clone(),
                event.path.to_string(),
            ];
            record.extend((0..species.len()).map(|i| {
                event.state.get(i).map(f64::to_string).unwrap_or_default()
            }));
            csv.write_record(&record)?;
        }

        csv.flush().map_err(|e| ExportError::Io {
            path: "<writer>".to_string(),
            source: e,
        })
    }
}
