//! CLI interface for the IP enrichment pipeline

use crate::error::{IpIntelError, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ip-intel")]
#[command(about = "AI-assisted IP address enrichment and risk reporting tool")]
#[command(
    long_about = "Enrich IP addresses from a CSV file with reputation and geolocation data plus an LLM risk assessment, and write a consolidated CSV report"
)]
pub struct Cli {
    /// Input CSV file; skips the interactive file picker
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Report file path; defaults to a timestamped file in the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Present the candidate input files as a numbered menu and read the
/// operator's choice from stdin.
pub fn select_input_file(candidates: &[PathBuf]) -> Result<PathBuf> {
    println!("\nAvailable input files:");
    for (index, file) in candidates.iter().enumerate() {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>");
        println!("{}. {}", index + 1, name);
    }

    print!("\nSelect the number of the file to process: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let index = parse_selection(&line, candidates.len())?;
    Ok(candidates[index].clone())
}

/// Turn a menu answer into a zero-based index into the candidate list.
fn parse_selection(line: &str, count: usize) -> Result<usize> {
    let trimmed = line.trim();
    let choice: usize = trimmed
        .parse()
        .map_err(|_| IpIntelError::Input(format!("Invalid selection: '{}'", trimmed)))?;
    if choice == 0 || choice > count {
        return Err(IpIntelError::Input(format!(
            "Selection out of range: {} (expected 1-{})",
            choice, count
        )));
    }
    Ok(choice - 1)
}

/// Validate file extension
pub fn validate_file_extension(
    path: &PathBuf,
    allowed_extensions: &[&str],
) -> std::result::Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
