//! Per-row enrichment orchestration

use crate::enrich::assessment::RiskAssessment;
use crate::enrich::geo::{GeoInfo, GeoLookup};
use crate::enrich::llm::RiskSummarizer;
use crate::error::{IpIntelError, Result};
use crate::input::loader::IpRecord;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Outcome of enriching one record. Lookup and summary failures stop at
/// this boundary as an error marker; they never abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOutcome {
    Enriched {
        geo: GeoInfo,
        assessment: RiskAssessment,
    },
    Failed {
        error: String,
    },
}

/// One enriched input record, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub ip: String,
    pub outcome: RowOutcome,
}

impl EnrichmentResult {
    pub fn is_enriched(&self) -> bool {
        matches!(self.outcome, RowOutcome::Enriched { .. })
    }
}

/// Drives the two lookups for every record, sequentially and in order.
pub struct Enricher<G, S> {
    geo: G,
    summarizer: S,
}

impl<G: GeoLookup, S: RiskSummarizer> Enricher<G, S> {
    pub fn new(geo: G, summarizer: S) -> Self {
        Self { geo, summarizer }
    }

    /// Enrich every record. Always returns exactly one result per record,
    /// in the same order as the input.
    pub async fn enrich_all(&self, records: &[IpRecord]) -> Vec<EnrichmentResult> {
        let progress = ProgressBar::new(records.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut results = Vec::with_capacity(records.len());
        for record in records {
            progress.set_message(record.ip.clone());
            let result = self.enrich_one(record).await;
            match &result.outcome {
                RowOutcome::Enriched { .. } => {
                    info!("Completed analysis for IP: {}", result.ip)
                }
                RowOutcome::Failed { error } => {
                    warn!("Analysis failed for IP '{}': {}", result.ip, error)
                }
            }
            results.push(result);
            progress.inc(1);
        }

        progress.finish_and_clear();
        results
    }

    async fn enrich_one(&self, record: &IpRecord) -> EnrichmentResult {
        // Reject malformed cells before spending a network call on them.
        if record.ip.parse::<IpAddr>().is_err() {
            return EnrichmentResult {
                ip: record.ip.clone(),
                outcome: RowOutcome::Failed {
                    error: format!("invalid IP address: '{}'", record.ip),
                },
            };
        }

        let outcome = match self.try_enrich(&record.ip).await {
            Ok((geo, assessment)) => RowOutcome::Enriched { geo, assessment },
            Err(e) => RowOutcome::Failed {
                error: marker_for(&e),
            },
        };
        EnrichmentResult {
            ip: record.ip.clone(),
            outcome,
        }
    }

    async fn try_enrich(&self, ip: &str) -> Result<(GeoInfo, RiskAssessment)> {
        let geo = self.geo.lookup(ip).await?;
        let narrative = self.summarizer.summarize(ip, &geo).await?;
        Ok((geo, RiskAssessment::parse(&narrative)))
    }
}

/// Error marker written into the report's error column.
fn marker_for(error: &IpIntelError) -> String {
    match error {
        IpIntelError::Lookup(cause) => format!("lookup failed: {}", cause),
        IpIntelError::Summary(cause) => format!("summary failed: {}", cause),
        other => format!("enrichment failed: {}", other),
    }
}
