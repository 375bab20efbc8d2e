use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::{AssessmentResult, PolicyKind, PolicyViolations};

const HIGH_BAR: f64 = 0.8;
const MEDIUM_BAR: f64 = 0.6;

/// Body accepted by the user-facing evaluation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub location_metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCheck {
    pub policy_type: String,
    pub detected: bool,
}

/// Presentation of an assessment for end users: rounded scores, one entry
/// per policy, and a one-line summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub quality_score: f64,
    pub relevancy_score: f64,
    pub violations: Vec<PolicyCheck>,
    pub summary: String,
}

impl EvaluationReport {
    pub fn from_assessment(assessment: &AssessmentResult) -> Self {
        let violations = PolicyKind::ALL
            .into_iter()
            .map(|policy| PolicyCheck {
                policy_type: policy.display_name().to_string(),
                detected: assessment.policy_violations.is_flagged(policy),
            })
            .collect();

        Self {
            quality_score: round2(assessment.quality_score),
            relevancy_score: round2(assessment.relevancy_score),
            violations,
            summary: summarize(
                assessment.quality_score,
                assessment.relevancy_score,
                &assessment.policy_violations,
            ),
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.iter().filter(|check| check.detected).count()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn summarize(quality: f64, relevancy: f64, violations: &PolicyViolations) -> String {
    let detected = violations.detected();
    if detected.is_empty() {
        return if quality >= HIGH_BAR && relevancy >= HIGH_BAR {
            "high-quality and relevant review".to_string()
        } else if quality >= MEDIUM_BAR && relevancy >= MEDIUM_BAR {
            "medium-quality review".to_string()
        } else {
            "low quality or relevance".to_string()
        };
    }

    let issues: Vec<&str> = detected.into_iter().map(PolicyKind::issue).collect();
    format!("review has issues: {}", issues.join(", "))
}
