//! Integration tests for the IP enrichment pipeline

use ip_intel::enrich::enricher::{Enricher, EnrichmentResult, RowOutcome};
use ip_intel::enrich::geo::{GeoInfo, GeoLookup};
use ip_intel::enrich::llm::RiskSummarizer;
use ip_intel::error::{IpIntelError, Result};
use ip_intel::input::loader::InputLoader;
use ip_intel::output::writer::ReportWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Deterministic lookup stub. Addresses in 10.0.0.0/8 fail the way the
/// live service rejects private ranges.
struct StubGeo;

impl GeoLookup for StubGeo {
    async fn lookup(&self, ip: &str) -> Result<GeoInfo> {
        if ip.starts_with("10.") {
            return Err(IpIntelError::Lookup(format!(
                "Reputation service rejected the query: private range ({})",
                ip
            )));
        }
        Ok(GeoInfo {
            organization: Some(format!("Org of {}", ip)),
            country: Some("Testland".to_string()),
            region: Some("West".to_string()),
            city: Some("Port Test".to_string()),
            isp: Some("Test ISP".to_string()),
            asn: Some("AS64496".to_string()),
        })
    }
}

/// Deterministic summarizer stub answering in the strict report format.
struct StubSummarizer;

impl RiskSummarizer for StubSummarizer {
    async fn summarize(&self, ip: &str, geo: &GeoInfo) -> Result<String> {
        Ok(format!(
            "Trustworthiness: 90\n\
             Primary Purpose: Test range for {org}\n\
             Security Concerns: NO, reserved documentation space\n\
             Risk Score: 10\n\
             Recommendation: No action required for {ip}",
            org = geo.organization.as_deref().unwrap_or("unknown"),
            ip = ip
        ))
    }
}

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

async fn run_pipeline(input: &Path, output: &Path) -> Vec<EnrichmentResult> {
    let loader = InputLoader::new(input.parent().unwrap());
    let records = loader.read_records(input).unwrap();

    let enricher = Enricher::new(StubGeo, StubSummarizer);
    let results = enricher.enrich_all(&records).await;

    let writer = ReportWriter::new(output.parent().unwrap());
    writer.write_to(&results, output).unwrap();
    results
}

#[tokio::test]
async fn test_pipeline_writes_one_report_row_per_input_row() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        temp.path(),
        "ips.csv",
        "ip,label\n192.0.2.1,edge\n198.51.100.7,vpn\n203.0.113.9,mail\n",
    );
    let report = temp.path().join("report.csv");

    run_pipeline(&input, &report).await;

    let mut reader = csv::Reader::from_path(&report).unwrap();
    assert_eq!(reader.headers().unwrap().get(0), Some("ip"));
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    let ips: Vec<&str> = rows.iter().map(|r| r.get(0).unwrap()).collect();
    assert_eq!(ips, vec!["192.0.2.1", "198.51.100.7", "203.0.113.9"]);

    // Enriched rows carry data and an empty error column
    assert_eq!(rows[0].get(1), Some("Org of 192.0.2.1"));
    assert_eq!(rows[0].get(12), Some(""));
}

#[tokio::test]
async fn test_failed_lookup_marks_its_row_and_spares_the_rest() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        temp.path(),
        "ips.csv",
        "ip\n192.0.2.1\n10.0.0.1\n198.51.100.7\n",
    );
    let report = temp.path().join("report.csv");

    let results = run_pipeline(&input, &report).await;
    assert!(results[0].is_enriched());
    assert!(!results[1].is_enriched());
    assert!(results[2].is_enriched());

    let mut reader = csv::Reader::from_path(&report).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    let error_cell = rows[1].get(12).unwrap();
    assert!(error_cell.starts_with("lookup failed:"));
    assert!(error_cell.contains("private range"));
    // The failed row keeps its data columns empty
    assert_eq!(rows[1].get(1), Some(""));
    assert_eq!(rows[1].get(9), Some(""));
    // Neighbors are untouched
    assert_eq!(rows[2].get(12), Some(""));
}

#[tokio::test]
async fn test_assessment_fields_land_in_their_columns() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "ips.csv", "ip\n192.0.2.1\n");
    let report = temp.path().join("report.csv");

    run_pipeline(&input, &report).await;

    let mut reader = csv::Reader::from_path(&report).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.get(6), Some("90"));
    assert_eq!(row.get(7), Some("Test range for Org of 192.0.2.1"));
    assert_eq!(row.get(9), Some("10"));
    assert_eq!(row.get(10), Some("No action required for 192.0.2.1"));
    assert!(row.get(11).unwrap().contains("Trustworthiness: 90"));
}

#[tokio::test]
async fn test_missing_ip_column_aborts_before_any_output() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "hosts.csv", "address\n192.0.2.1\n");
    let out_dir = temp.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let loader = InputLoader::new(temp.path());
    let err = loader.read_records(&input).unwrap_err();
    assert!(matches!(err, IpIntelError::Input(_)));
    assert!(err.is_fatal());

    // Nothing was enriched, so nothing may be written
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_blocked_output_directory_fails_after_enrichment() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "ips.csv", "ip\n192.0.2.1\n");

    let loader = InputLoader::new(temp.path());
    let records = loader.read_records(&input).unwrap();
    let enricher = Enricher::new(StubGeo, StubSummarizer);
    let results = enricher.enrich_all(&records).await;
    assert!(results.iter().all(|r| r.is_enriched()));

    // A plain file sitting where the output directory should be
    let blocker = temp.path().join("blocked");
    std::fs::write(&blocker, "occupied").unwrap();

    let writer = ReportWriter::new(&blocker);
    let err = writer.write(&results).unwrap_err();
    assert!(matches!(err, IpIntelError::Output(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_same_input_yields_byte_identical_reports() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        temp.path(),
        "ips.csv",
        "ip\n192.0.2.1\n10.0.0.1\nnot-an-ip\n198.51.100.7\n",
    );
    let first = temp.path().join("first.csv");
    let second = temp.path().join("second.csv");

    run_pipeline(&input, &first).await;
    run_pipeline(&input, &second).await;

    let first_bytes = std::fs::read(&first).unwrap();
    let second_bytes = std::fs::read(&second).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[tokio::test]
async fn test_header_only_input_yields_header_only_report() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "ips.csv", "ip\n");
    let report = temp.path().join("report.csv");

    run_pipeline(&input, &report).await;

    let mut reader = csv::Reader::from_path(&report).unwrap();
    assert_eq!(reader.headers().unwrap().len(), 13);
    assert_eq!(reader.records().count(), 0);
}

#[tokio::test]
async fn test_invalid_cells_are_reported_not_dropped() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), "ips.csv", "ip\nnot-an-ip\n192.0.2.1\n");
    let report = temp.path().join("report.csv");

    let results = run_pipeline(&input, &report).await;
    assert_eq!(results.len(), 2);
    match &results[0].outcome {
        RowOutcome::Failed { error } => assert!(error.starts_with("invalid IP address")),
        RowOutcome::Enriched { .. } => panic!("malformed cell must not enrich"),
    }

    let mut reader = csv::Reader::from_path(&report).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows[0].get(0), Some("not-an-ip"));
    assert!(rows[0].get(12).unwrap().starts_with("invalid IP address"));
}
