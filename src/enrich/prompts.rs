//! Prompt construction for the risk assessment request

use crate::enrich::geo::GeoInfo;
use serde::{Deserialize, Serialize};

/// System prompt sent with every risk assessment request.
pub const SYSTEM_PROMPT: &str = "You are a cybersecurity expert analyzing IP addresses and their associated data. For each IP, assess trustworthiness based on organization and location, the primary purpose of the address, potential security concerns, and geographic relevance. Provide concise, factual assessments.";

/// Prompt templates for the language model
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub risk_assessment: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            risk_assessment: RISK_ASSESSMENT_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub ip: String,
    pub organization: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub isp: String,
    pub asn: String,
}

impl PromptParams {
    /// Build parameters from lookup results, substituting "unknown" for
    /// fields the reputation service left empty.
    pub fn new(ip: &str, geo: &GeoInfo) -> Self {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or("unknown")
                .to_string()
        };
        Self {
            ip: ip.to_string(),
            organization: field(&geo.organization),
            country: field(&geo.country),
            region: field(&geo.region),
            city: field(&geo.city),
            isp: field(&geo.isp),
            asn: field(&geo.asn),
        }
    }
}

impl PromptTemplates {
    /// Render the risk assessment prompt for one IP address.
    pub fn render_risk_assessment(&self, params: &PromptParams) -> String {
        self.risk_assessment
            .replace("{ip}", &params.ip)
            .replace("{organization}", &params.organization)
            .replace("{country}", &params.country)
            .replace("{region}", &params.region)
            .replace("{city}", &params.city)
            .replace("{isp}", &params.isp)
            .replace("{asn}", &params.asn)
    }
}

const RISK_ASSESSMENT_TEMPLATE: &str = r#"TASK: Analyze the following IP address and its reputation data and provide a security assessment.

<IP DATA>
IP Address: {ip}
Organization: {organization}
Country: {country}
Region: {region}
City: {city}
ISP: {isp}
AS: {asn}
</IP DATA>

Provide the assessment in exactly this format:

Trustworthiness: [score 1-100]
Primary Purpose: [single line, maximum 20 words]
Security Concerns: [YES or NO, followed by an explanation of maximum 15 words]
Risk Score: [score 1-100]
Recommendation: ['No action required' or 'Requires attention', with maximum 20 words of detail]

FORMAT RULES:
1. Each field on its own line
2. Use the exact field names shown above
3. One colon and one space after each field name
4. No additional commentary before or after the fields"#;
