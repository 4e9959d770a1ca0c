//! CSV input loading

use crate::error::{IpIntelError, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Header of the one required input column.
pub const IP_COLUMN: &str = "ip";

/// A single row of the input file: one IP address to enrich. The cell is
/// kept verbatim here; validation happens during enrichment so that a bad
/// value still produces a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRecord {
    pub ip: String,
}

/// Discovers candidate input files and loads IP records from them.
pub struct InputLoader {
    input_dir: PathBuf,
}

impl InputLoader {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }

    /// List the `.csv` files in the input directory, sorted by name.
    pub fn list_input_files(&self) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.input_dir).map_err(|e| {
            IpIntelError::Input(format!(
                "Cannot read input directory '{}': {}",
                self.input_dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                IpIntelError::Input(format!(
                    "Cannot read input directory '{}': {}",
                    self.input_dir.display(),
                    e
                ))
            })?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if path.is_file() && is_csv {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Like [`Self::list_input_files`], but an empty input directory is a
    /// fatal error rather than an empty listing.
    pub fn require_input_files(&self) -> Result<Vec<PathBuf>> {
        let files = self.list_input_files()?;
        if files.is_empty() {
            return Err(IpIntelError::Input(format!(
                "No CSV files found in '{}'",
                self.input_dir.display()
            )));
        }
        Ok(files)
    }

    /// Read every record from `path` in file order. Rows are returned even
    /// when the IP cell is empty; columns other than `ip` are ignored.
    pub fn read_records(&self, path: &Path) -> Result<Vec<IpRecord>> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            IpIntelError::Input(format!("Cannot open input file '{}': {}", path.display(), e))
        })?;

        let headers = reader.headers().map_err(|e| {
            IpIntelError::Input(format!(
                "Cannot read header of '{}': {}",
                path.display(),
                e
            ))
        })?;
        let ip_index = headers
            .iter()
            .position(|h| h.trim() == IP_COLUMN)
            .ok_or_else(|| {
                IpIntelError::Input(format!(
                    "Input file '{}' has no '{}' column",
                    path.display(),
                    IP_COLUMN
                ))
            })?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| {
                IpIntelError::Input(format!(
                    "Cannot read row {} of '{}': {}",
                    records.len() + 2,
                    path.display(),
                    e
                ))
            })?;
            let ip = row.get(ip_index).unwrap_or("").trim().to_string();
            records.push(IpRecord { ip });
        }

        info!("Read {} records from {}", records.len(), path.display());
        Ok(records)
    }
}
