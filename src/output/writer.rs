//! CSV report writing

use crate::enrich::enricher::EnrichmentResult;
use crate::error::{IpIntelError, Result};
use crate::output::report::ReportRow;
use chrono::Local;
use log::info;
use std::path::{Path, PathBuf};

/// Writes the consolidated report in one pass from the full result set.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write all results to a timestamped file in the output directory and
    /// return its path.
    pub fn write(&self, results: &[EnrichmentResult]) -> Result<PathBuf> {
        let filename = format!("ip_analysis_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);
        self.write_to(results, &path)?;
        Ok(path)
    }

    /// Write all results to `path`, creating parent directories and
    /// overwriting any previous report at the same location.
    pub fn write_to(&self, results: &[EnrichmentResult], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    IpIntelError::Output(format!(
                        "Cannot create output directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            IpIntelError::Output(format!(
                "Cannot create report file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // The header is written explicitly so that a run with zero records
        // still produces a well-formed report.
        writer.write_record(ReportRow::COLUMNS).map_err(|e| {
            IpIntelError::Output(format!(
                "Cannot write report header to '{}': {}",
                path.display(),
                e
            ))
        })?;

        for result in results {
            let row = ReportRow::from(result);
            writer.write_record(row.values()).map_err(|e| {
                IpIntelError::Output(format!(
                    "Cannot write report row for '{}': {}",
                    result.ip, e
                ))
            })?;
        }

        writer.flush().map_err(|e| {
            IpIntelError::Output(format!(
                "Cannot flush report file '{}': {}",
                path.display(),
                e
            ))
        })?;

        info!("Wrote {} report rows to {}", results.len(), path.display());
        Ok(())
    }
}
