use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version tag stamped on every assessment produced by the rule-based scorer.
pub const MODEL_VERSION: &str = "1.0.0";

/// Review body plus caller-supplied context that rides along untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewInput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ReviewInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// The three content policies a review is screened against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Advertisement,
    IrrelevantContent,
    RantWithoutVisit,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Advertisement,
        PolicyKind::IrrelevantContent,
        PolicyKind::RantWithoutVisit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PolicyKind::Advertisement => "advertisement",
            PolicyKind::IrrelevantContent => "irrelevant_content",
            PolicyKind::RantWithoutVisit => "rant_without_visit",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PolicyKind::Advertisement => "No Advertisement",
            PolicyKind::IrrelevantContent => "No Irrelevant Content",
            PolicyKind::RantWithoutVisit => "No Rant Without Visit",
        }
    }

    /// Short phrase used when summarising a detected violation.
    pub fn issue(self) -> &'static str {
        match self {
            PolicyKind::Advertisement => "contains advertising",
            PolicyKind::IrrelevantContent => "irrelevant content",
            PolicyKind::RantWithoutVisit => "possible rant without a visit",
        }
    }
}

/// Fixed-shape violation record; every flag is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyViolations {
    pub advertisement: bool,
    pub irrelevant_content: bool,
    pub rant_without_visit: bool,
}

impl PolicyViolations {
    pub fn is_flagged(&self, policy: PolicyKind) -> bool {
        match policy {
            PolicyKind::Advertisement => self.advertisement,
            PolicyKind::IrrelevantContent => self.irrelevant_content,
            PolicyKind::RantWithoutVisit => self.rant_without_visit,
        }
    }

    pub fn detected(&self) -> Vec<PolicyKind> {
        PolicyKind::ALL
            .into_iter()
            .filter(|policy| self.is_flagged(*policy))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.detected().len()
    }

    pub fn any(&self) -> bool {
        self.advertisement || self.irrelevant_content || self.rant_without_visit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    pub text_length: usize,
    pub processed_at: DateTime<Local>,
    pub model_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_metadata: Option<Map<String, Value>>,
}

/// Scores and policy flags produced for a single review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub quality_score: f64,
    pub relevancy_score: f64,
    pub policy_violations: PolicyViolations,
    pub metadata: AssessmentMetadata,
}
