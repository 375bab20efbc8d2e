use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::domain::{
    AssessmentMetadata, AssessmentResult, PolicyViolations, ReviewInput, MODEL_VERSION,
};
use super::lexicon::{KeywordLexicon, LexiconCategory};

// Weights are expressed in hundredths so boundary scores stay exact.
const QUALITY_BASE: i32 = 70;
const RELEVANCY_BASE: i32 = 80;
const POSITIVE_POINTS: i32 = 5;
const NEGATIVE_POINTS: i32 = -10;
const SPAM_POINTS: i32 = -20;
const IRRELEVANT_POINTS: i32 = -30;
const SHORT_TEXT_POINTS: i32 = -20;
const LONG_TEXT_POINTS: i32 = 10;
const SHORT_TEXT_BELOW: usize = 10;
const LONG_TEXT_ABOVE: usize = 100;
const SCORE_CEILING: i32 = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// What triggered a score adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSignal {
    PositiveKeyword,
    NegativeKeyword,
    SpamKeyword,
    IrrelevantKeyword,
    ShortText,
    LongText,
}

/// Single contribution to a score, kept for audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub signal: ScoreSignal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Adjustment in hundredths of a point.
    pub points: i32,
}

impl ScoreAdjustment {
    fn keyword(signal: ScoreSignal, keyword: &str, points: i32) -> Self {
        Self {
            signal,
            keyword: Some(keyword.to_string()),
            points,
        }
    }

    pub fn delta(&self) -> f64 {
        f64::from(self.points) / 100.0
    }
}

/// Every adjustment behind a pair of scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub quality_score: f64,
    pub relevancy_score: f64,
    pub quality: Vec<ScoreAdjustment>,
    pub relevancy: Vec<ScoreAdjustment>,
    pub policy_violations: PolicyViolations,
}

/// Stateless keyword scorer sharing one immutable lexicon.
#[derive(Debug, Clone)]
pub struct ReviewScorer {
    lexicon: Arc<KeywordLexicon>,
}

impl Default for ReviewScorer {
    fn default() -> Self {
        Self::new(Arc::new(KeywordLexicon::standard()))
    }
}

impl ReviewScorer {
    pub fn new(lexicon: Arc<KeywordLexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    /// Score a review and flag policy violations.
    pub fn assess(&self, input: ReviewInput) -> Result<AssessmentResult, AssessmentError> {
        let ReviewInput { text, metadata } = input;
        let breakdown = self.explain(&text)?;

        Ok(AssessmentResult {
            quality_score: breakdown.quality_score,
            relevancy_score: breakdown.relevancy_score,
            policy_violations: breakdown.policy_violations,
            metadata: AssessmentMetadata {
                text_length: text.chars().count(),
                processed_at: Local::now(),
                model_version: MODEL_VERSION.to_string(),
                request_metadata: metadata,
            },
        })
    }

    /// Same evaluation as [`ReviewScorer::assess`], returning each adjustment.
    pub fn explain(&self, text: &str) -> Result<ScoreBreakdown, AssessmentError> {
        if text.trim().is_empty() {
            return Err(AssessmentError::InvalidInput(
                "review text must not be empty".to_string(),
            ));
        }

        let lowered = text.to_lowercase();
        let quality = self.quality_adjustments(&lowered, text.chars().count());
        let relevancy = self.relevancy_adjustments(&lowered);
        let policy_violations = self.policy_violations(&lowered);

        Ok(ScoreBreakdown {
            quality_score: settle(QUALITY_BASE, &quality),
            relevancy_score: settle(RELEVANCY_BASE, &relevancy),
            quality,
            relevancy,
            policy_violations,
        })
    }

    fn quality_adjustments(&self, lowered: &str, original_length: usize) -> Vec<ScoreAdjustment> {
        let mut adjustments = Vec::new();
        let keyword_rules = [
            (LexiconCategory::Positive, ScoreSignal::PositiveKeyword, POSITIVE_POINTS),
            (LexiconCategory::Negative, ScoreSignal::NegativeKeyword, NEGATIVE_POINTS),
            (LexiconCategory::Spam, ScoreSignal::SpamKeyword, SPAM_POINTS),
        ];
        for (category, signal, points) in keyword_rules {
            adjustments.extend(
                self.lexicon
                    .matches(category, lowered)
                    .map(|keyword| ScoreAdjustment::keyword(signal, keyword, points)),
            );
        }

        if original_length < SHORT_TEXT_BELOW {
            adjustments.push(ScoreAdjustment {
                signal: ScoreSignal::ShortText,
                keyword: None,
                points: SHORT_TEXT_POINTS,
            });
        } else if original_length > LONG_TEXT_ABOVE {
            adjustments.push(ScoreAdjustment {
                signal: ScoreSignal::LongText,
                keyword: None,
                points: LONG_TEXT_POINTS,
            });
        }

        adjustments
    }

    fn relevancy_adjustments(&self, lowered: &str) -> Vec<ScoreAdjustment> {
        self.lexicon
            .matches(LexiconCategory::Irrelevant, lowered)
            .map(|keyword| {
                ScoreAdjustment::keyword(ScoreSignal::IrrelevantKeyword, keyword, IRRELEVANT_POINTS)
            })
            .collect()
    }

    fn policy_violations(&self, lowered: &str) -> PolicyViolations {
        PolicyViolations {
            advertisement: self.lexicon.contains_any(LexiconCategory::Spam, lowered),
            irrelevant_content: self
                .lexicon
                .contains_any(LexiconCategory::Irrelevant, lowered),
            rant_without_visit: self
                .lexicon
                .contains_any(LexiconCategory::RantWithoutVisit, lowered),
        }
    }
}

fn settle(base: i32, adjustments: &[ScoreAdjustment]) -> f64 {
    let total = adjustments
        .iter()
        .fold(base, |acc, adjustment| acc.saturating_add(adjustment.points));
    f64::from(total.clamp(0, SCORE_CEILING)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ReviewScorer {
        ReviewScorer::default()
    }

    #[test]
    fn neutral_text_keeps_base_scores() {
        let breakdown = scorer()
            .explain("The table by the window was free at noon.")
            .expect("valid text");
        assert!(breakdown.quality.is_empty());
        assert!(breakdown.relevancy.is_empty());
        assert_eq!(breakdown.quality_score, 0.7);
        assert_eq!(breakdown.relevancy_score, 0.8);
        assert!(!breakdown.policy_violations.any());
    }

    #[test]
    fn whitespace_only_text_is_invalid() {
        match scorer().explain("  \n\t ") {
            Err(AssessmentError::InvalidInput(message)) => assert!(message.contains("empty")),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let once = scorer().explain("great food at this spot").expect("valid");
        let thrice = scorer()
            .explain("great great great food here")
            .expect("valid");
        assert_eq!(once.quality_score, 0.75);
        assert_eq!(thrice.quality_score, 0.75);
    }

    #[test]
    fn length_adjustment_uses_characters_not_bytes() {
        // nine CJK characters, 27 bytes
        let breakdown = scorer().explain("我们昨天晚上来这里").expect("valid");
        assert_eq!(breakdown.quality_score, 0.5);
        assert!(breakdown
            .quality
            .iter()
            .any(|adjustment| adjustment.signal == ScoreSignal::ShortText));
    }

    #[test]
    fn irrelevant_keywords_drive_relevancy_to_zero() {
        let breakdown = scorer()
            .explain("手机 电脑 汽车 talk, nothing about the cafe")
            .expect("valid");
        assert_eq!(breakdown.relevancy.len(), 3);
        assert_eq!(breakdown.relevancy_score, 0.0);
        assert!(breakdown.policy_violations.irrelevant_content);
    }

    #[test]
    fn adjustment_delta_is_in_points() {
        let breakdown = scorer().explain("a truly rude waiter").expect("valid");
        let rude = breakdown
            .quality
            .iter()
            .find(|adjustment| adjustment.keyword.as_deref() == Some("rude"))
            .expect("rude matched");
        assert_eq!(rude.delta(), -0.1);
    }
}
