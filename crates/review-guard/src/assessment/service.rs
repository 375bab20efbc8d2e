use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{AssessmentResult, PolicyKind, ReviewInput, MODEL_VERSION};
use super::report::{EvaluationReport, EvaluationRequest};
use super::scorer::{AssessmentError, ReviewScorer};
use crate::text::{extract_features, TextFeatures};

pub const DEFAULT_MAX_REVIEW_LENGTH: usize = 5000;
const LOG_PREVIEW_CHARS: usize = 50;

/// Intake limits applied before a review reaches the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakePolicy {
    pub max_review_length: usize,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            max_review_length: DEFAULT_MAX_REVIEW_LENGTH,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("missing required field: review_text")]
    MissingReviewText,
    #[error("review text exceeds the {max} character limit (found {found})")]
    TooLong { max: usize, found: usize },
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

/// Static description of the scoring model served on `/ml-api/model-info`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_name: &'static str,
    pub model_version: &'static str,
    pub model_type: &'static str,
    pub supported_languages: Vec<&'static str>,
    pub features: Vec<&'static str>,
    pub policies: Vec<&'static str>,
}

/// Facade composing the scorer with request trimming and intake limits.
pub struct ReviewAssessmentService {
    scorer: Arc<ReviewScorer>,
    policy: IntakePolicy,
}

impl ReviewAssessmentService {
    pub fn new(scorer: Arc<ReviewScorer>, policy: IntakePolicy) -> Self {
        Self { scorer, policy }
    }

    pub fn scorer(&self) -> &ReviewScorer {
        &self.scorer
    }

    pub fn policy(&self) -> IntakePolicy {
        self.policy
    }

    /// Trim and score a raw review.
    pub fn predict(&self, input: ReviewInput) -> Result<AssessmentResult, AssessmentError> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(AssessmentError::InvalidInput(
                "Text field is required".to_string(),
            ));
        }

        let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        info!("processing review: {preview}...");

        let result = self.scorer.assess(ReviewInput {
            text: text.to_string(),
            metadata: input.metadata,
        })?;

        info!(
            quality = result.quality_score,
            relevancy = result.relevancy_score,
            "assessment completed"
        );
        Ok(result)
    }

    /// Validate an end-user request, score it, and build the report view.
    pub fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationReport, EvaluationError> {
        let text = request
            .review_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(EvaluationError::MissingReviewText)?;

        let length = text.chars().count();
        if length > self.policy.max_review_length {
            return Err(EvaluationError::TooLong {
                max: self.policy.max_review_length,
                found: length,
            });
        }

        debug!(length, "evaluating review");
        let mut input = ReviewInput::new(text);
        input.metadata = request.location_metadata;
        let assessment = self.predict(input)?;
        let report = EvaluationReport::from_assessment(&assessment);
        debug!(violations = report.violation_count(), "review evaluated");
        Ok(report)
    }

    pub fn features(&self, text: &str) -> Result<TextFeatures, AssessmentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AssessmentError::InvalidInput(
                "Text field is required".to_string(),
            ));
        }
        Ok(extract_features(text))
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_name: "Review Assessment Model",
            model_version: MODEL_VERSION,
            model_type: "Rule-based",
            supported_languages: vec!["zh-CN", "en"],
            features: vec![
                "Quality scoring",
                "Relevancy assessment",
                "Policy violation detection",
            ],
            policies: PolicyKind::ALL
                .into_iter()
                .map(PolicyKind::display_name)
                .collect(),
        }
    }
}

impl Default for ReviewAssessmentService {
    fn default() -> Self {
        Self::new(Arc::new(ReviewScorer::default()), IntakePolicy::default())
    }
}
