//! JSON output of study reports

use crate::Result;
use rm_study::StudyReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `report` as pretty-printed JSON with two-space indentation
pub fn write_report<W: Write>(writer: W, report: &StudyReport) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

pub fn report_to_string(report: &StudyReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Create or truncate `path` and write the report into it
pub fn write_report_file<P: AsRef<Path>>(path: P, report: &StudyReport) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, report)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        significant = report.summary.len(),
        "wrote study report"
    );
    Ok(())
}
