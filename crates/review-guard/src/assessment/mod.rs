//! Rule-based review assessment: keyword lexicon, scorer, report views and
//! the HTTP router that exposes them.

pub mod domain;
pub mod lexicon;
pub mod report;
pub mod router;
pub mod scorer;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentMetadata, AssessmentResult, PolicyKind, PolicyViolations, ReviewInput,
    MODEL_VERSION,
};
pub use lexicon::{KeywordLexicon, LexiconCategory, LexiconError};
pub use report::{EvaluationReport, EvaluationRequest, PolicyCheck};
pub use router::review_router;
pub use scorer::{AssessmentError, ReviewScorer, ScoreAdjustment, ScoreBreakdown, ScoreSignal};
pub use service::{
    EvaluationError, IntakePolicy, ModelInfo, ReviewAssessmentService, DEFAULT_MAX_REVIEW_LENGTH,
};
