//! Report row structure with the fixed output column set

use crate::enrich::enricher::{EnrichmentResult, RowOutcome};

/// One line of the consolidated report. `COLUMNS` and `values` define the
/// same fixed order, so the header row is written even for an empty run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    /// IP address exactly as it appeared in the input file.
    pub ip: String,
    pub organization: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub isp: String,
    pub trustworthiness: String,
    pub primary_purpose: String,
    pub security_concerns: String,
    pub risk_score: String,
    pub recommendation: String,
    /// Full narrative returned by the language model.
    pub risk_summary: String,
    /// Error marker for rows whose enrichment failed; empty on success.
    pub error: String,
}

impl ReportRow {
    /// Report header, in column order.
    pub const COLUMNS: [&'static str; 13] = [
        "ip",
        "organization",
        "country",
        "region",
        "city",
        "isp",
        "trustworthiness",
        "primary_purpose",
        "security_concerns",
        "risk_score",
        "recommendation",
        "risk_summary",
        "error",
    ];

    /// Cell values in the same order as `COLUMNS`.
    pub fn values(&self) -> [&str; 13] {
        [
            &self.ip,
            &self.organization,
            &self.country,
            &self.region,
            &self.city,
            &self.isp,
            &self.trustworthiness,
            &self.primary_purpose,
            &self.security_concerns,
            &self.risk_score,
            &self.recommendation,
            &self.risk_summary,
            &self.error,
        ]
    }
}

impl From<&EnrichmentResult> for ReportRow {
    fn from(result: &EnrichmentResult) -> Self {
        match &result.outcome {
            RowOutcome::Enriched { geo, assessment } => Self {
                ip: result.ip.clone(),
                organization: geo.organization.clone().unwrap_or_default(),
                country: geo.country.clone().unwrap_or_default(),
                region: geo.region.clone().unwrap_or_default(),
                city: geo.city.clone().unwrap_or_default(),
                isp: geo.isp.clone().unwrap_or_default(),
                trustworthiness: assessment.trustworthiness.clone(),
                primary_purpose: assessment.primary_purpose.clone(),
                security_concerns: assessment.security_concerns.clone(),
                risk_score: assessment.risk_score.clone(),
                recommendation: assessment.recommendation.clone(),
                risk_summary: assessment.narrative.clone(),
                error: String::new(),
            },
            RowOutcome::Failed { error } => Self {
                ip: result.ip.clone(),
                error: error.clone(),
                ..Default::default()
            },
        }
    }
}
