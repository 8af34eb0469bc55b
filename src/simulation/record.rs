//! Timestamped command log
//!
//! Every command an elevator emits during a run becomes one [`LogRecord`]. The log is
//! written as JSON lines, one record per line.

use crate::elevator::ElevatorCommand;
use crate::simulation::error::SimulationResult;
use crate::types::{EntranceId, RunId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One command emitted by an elevator during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Run the record belongs to
    pub run_id: RunId,
    /// Simulated instant of emission
    pub timestamp: DateTime<Utc>,
    /// Milliseconds since the run started
    pub elapsed_ms: u64,
    /// Entrance whose elevator emitted the command
    pub entrance: EntranceId,
    /// The command itself
    #[serde(flatten)]
    pub command: ElevatorCommand,
}

/// Write records as JSON lines
pub fn write_json_lines<W: Write>(records: &[LogRecord], mut writer: W) -> SimulationResult<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as JSON lines to a file, replacing it
pub fn save_json_lines<P: AsRef<Path>>(records: &[LogRecord], path: P) -> SimulationResult<()> {
    let file = File::create(path)?;
    write_json_lines(records, BufWriter::new(file))
}
