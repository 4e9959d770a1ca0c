//! ip-intel: AI-assisted IP address enrichment and risk reporting tool

use clap::Parser;
use colored::Colorize;
use ip_intel::cli::{self, Cli};
use ip_intel::config::{Config, Credentials};
use ip_intel::enrich::enricher::Enricher;
use ip_intel::enrich::geo::IpApiClient;
use ip_intel::enrich::llm::ClaudeClient;
use ip_intel::error::{IpIntelError, Result};
use ip_intel::input::loader::InputLoader;
use ip_intel::output::writer::ReportWriter;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Pick up API keys from a .env file if one is present
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Both API keys must be present before any work starts
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_pipeline(cli, config, credentials).await {
        error!("Analysis failed: {}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_pipeline(cli: Cli, config: Config, credentials: Credentials) -> Result<()> {
    info!("Starting IP enrichment run");
    println!("🚀 IP enrichment and risk analysis");

    let loader = InputLoader::new(&config.directories.input_dir);

    // Resolve the input file, interactively unless --input was given
    let input_file = match cli.input {
        Some(path) => {
            cli::validate_file_extension(&path, &["csv"])
                .map_err(|e| IpIntelError::Input(format!("Input file: {}", e)))?;
            path
        }
        None => {
            let candidates = loader.require_input_files()?;
            cli::select_input_file(&candidates)?
        }
    };

    println!("📄 Input: {}", input_file.display());
    let records = loader.read_records(&input_file)?;
    println!("🔍 Analyzing {} IP addresses...", records.len());

    let geo_client = IpApiClient::new(&config.geo.endpoint, &credentials.geo_api_key);
    let llm_client = ClaudeClient::new(config.llm.clone(), &credentials.llm_api_key);
    let enricher = Enricher::new(geo_client, llm_client);

    let results = enricher.enrich_all(&records).await;

    // The report is written in one pass after the enrichment phase completes
    let writer = ReportWriter::new(&config.directories.output_dir);
    let report_path = match &cli.output {
        Some(path) => {
            writer.write_to(&results, path)?;
            path.clone()
        }
        None => writer.write(&results)?,
    };

    let enriched = results.iter().filter(|r| r.is_enriched()).count();
    let failed = results.len() - enriched;

    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        report_path.display()
    );
    if failed > 0 {
        println!(
            "📊 {} enriched, {} failed",
            enriched.to_string().green(),
            failed.to_string().red()
        );
    } else {
        println!("📊 {} enriched, {} failed", enriched.to_string().green(), failed);
    }

    Ok(())
}
