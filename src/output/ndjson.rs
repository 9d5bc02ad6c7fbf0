//! Newline-delimited JSON crawl log
//!
//! Each processed page becomes one line of `crawl-log.ndjson` in the output
//! folder. The file is opened in append mode for every report, so a run that
//! is killed halfway still leaves every finished page on disk, and several
//! runs against the same folder accumulate in one log.

use crate::output::traits::{OutputError, OutputResult, ReportSink};
use crate::report::UrlReport;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File name of the crawl log inside the output folder
pub const CRAWL_LOG_FILE_NAME: &str = "crawl-log.ndjson";

/// Sink appending one JSON object per line to `crawl-log.ndjson`
#[derive(Debug, Clone)]
pub struct NdjsonSink {
    path: PathBuf,
}

impl NdjsonSink {
    /// Creates a sink writing into `output_folder`
    ///
    /// The folder is created if it does not exist yet. The log file itself is
    /// created on the first report.
    pub fn new(output_folder: &Path) -> OutputResult<Self> {
        fs::create_dir_all(output_folder)?;
        Ok(Self {
            path: output_folder.join(CRAWL_LOG_FILE_NAME),
        })
    }

    /// Full path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for NdjsonSink {
    fn emit(&mut self, report: &UrlReport) -> OutputResult<()> {
        let mut line = serde_json::to_string(report)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}

/// Reads every report from a crawl log
///
/// Blank lines are skipped.
///
/// # Returns
///
/// * `Ok(Vec<UrlReport>)` - Reports in file order
/// * `Err(OutputError::Parse)` - A line is not a valid report; `line` is 1-based
/// * `Err(OutputError::Io)` - The file could not be read
pub fn read_reports(path: &Path) -> OutputResult<Vec<UrlReport>> {
    let reader = BufReader::new(File::open(path)?);
    let mut reports = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let report = serde_json::from_str(&line).map_err(|source| OutputError::Parse {
            line: index + 1,
            source,
        })?;
        reports.push(report);
    }

    Ok(reports)
}
