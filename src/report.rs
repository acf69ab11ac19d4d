//! Result sink: the CSV report and the plain-text error log.
//!
//! Both targets are append-only once open. The report is truncated at the
//! start of every run and always begins with the fixed header row; the error
//! log accumulates across runs.

use chrono::Local;
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use crate::{check::Outcome, Result};

pub const REPORT_HEADER: [&str; 5] = ["Timestamp", "Test Name", "Status", "Message", "Duration"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tabular report writer. One row per check outcome, stamped at write time.
pub struct Report {
    writer: csv::Writer<File>,
}

impl Report {
    /// Create or truncate the report and write the header row.
    pub fn create(path: &Path) -> Result<Report> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(REPORT_HEADER)?;
        writer.flush()?;
        Ok(Report { writer })
    }

    /// Append one outcome row. Rows are flushed immediately so a partial run
    /// still leaves a readable report behind.
    pub fn record(&mut self, outcome: &Outcome) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let duration = format!("{:.2}s", outcome.duration.as_secs_f64());
        self.writer.write_record([
            timestamp.as_str(),
            outcome.name,
            &outcome.status.to_string(),
            &outcome.message,
            &duration,
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Append-only error log, one bracket-timestamped line per entry.
pub struct ErrorLog {
    file: File,
}

impl ErrorLog {
    pub fn open(path: &Path) -> Result<ErrorLog> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(ErrorLog { file })
    }

    pub fn append(&mut self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(self.file, "[{timestamp}] {message}")?;
        self.file.flush()?;
        Ok(())
    }
}
