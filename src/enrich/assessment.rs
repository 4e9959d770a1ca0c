//! Parsing of the structured assessment returned by the language model

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured fields recovered from the model's fixed-format answer, plus
/// the untouched narrative. Fields the model omitted stay empty; parsing
/// never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub trustworthiness: String,
    pub primary_purpose: String,
    pub security_concerns: String,
    pub risk_score: String,
    pub recommendation: String,
    pub narrative: String,
}

#[derive(Clone, Copy)]
enum Field {
    Trustworthiness,
    PrimaryPurpose,
    SecurityConcerns,
    RiskScore,
    Recommendation,
}

impl RiskAssessment {
    /// Parse the model output line by line. A line opening a known field
    /// starts that field, later lines without a field label continue the
    /// current one, and anything before the first label is ignored.
    pub fn parse(narrative: &str) -> Self {
        let field_line = Regex::new(
            r"(?i)^[\s*#-]*(trustworthiness|primary purpose|security concerns|risk score|recommendation)\s*:\s*(.*)$",
        )
        .unwrap();

        let mut assessment = RiskAssessment {
            narrative: narrative.trim().to_string(),
            ..Default::default()
        };
        let mut current: Option<Field> = None;

        for line in narrative.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = field_line.captures(line) {
                let field = match caps[1].to_lowercase().as_str() {
                    "trustworthiness" => Field::Trustworthiness,
                    "primary purpose" => Field::PrimaryPurpose,
                    "security concerns" => Field::SecurityConcerns,
                    "risk score" => Field::RiskScore,
                    _ => Field::Recommendation,
                };
                *assessment.field_mut(field) = caps[2].trim().to_string();
                current = Some(field);
            } else if let Some(field) = current {
                let slot = assessment.field_mut(field);
                if !slot.is_empty() {
                    slot.push(' ');
                }
                slot.push_str(line);
            }
        }

        assessment
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Trustworthiness => &mut self.trustworthiness,
            Field::PrimaryPurpose => &mut self.primary_purpose,
            Field::SecurityConcerns => &mut self.security_concerns,
            Field::RiskScore => &mut self.risk_score,
            Field::Recommendation => &mut self.recommendation,
        }
    }
}
