use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use tracing::{info, warn};

use super::{column_index, normalized_headers, DatasetError, NAME_COLUMN, REVIEW_TEXT_COLUMN};
use crate::assessment::{AssessmentError, ReviewInput, ReviewScorer};
use crate::text::extract_features;

/// One output row of a batch scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    pub row: usize,
    pub name: Option<String>,
    pub quality_score: f64,
    pub relevancy_score: f64,
    pub advertisement: bool,
    pub irrelevant_content: bool,
    pub rant_without_visit: bool,
    pub text_length: usize,
    pub word_count: usize,
    pub sentiment_score: f64,
    pub detected_language: &'static str,
    pub has_url: bool,
    pub has_email: bool,
    pub has_phone: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub rows: usize,
    pub scored: usize,
    pub skipped: usize,
    pub advertisement: usize,
    pub irrelevant_content: usize,
    pub rant_without_visit: usize,
}

impl ScoreSummary {
    fn record(&mut self, review: &ScoredReview) {
        self.scored += 1;
        self.advertisement += usize::from(review.advertisement);
        self.irrelevant_content += usize::from(review.irrelevant_content);
        self.rant_without_visit += usize::from(review.rant_without_visit);
    }
}

/// Score every review in a CSV export. Rows without text are skipped.
pub fn score_reviews<R: Read, W: Write>(
    scorer: &ReviewScorer,
    reader: R,
    writer: W,
) -> Result<ScoreSummary, DatasetError> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);
    let headers = normalized_headers(csv_reader.headers()?);
    let text_index = column_index(&headers, REVIEW_TEXT_COLUMN)?;
    let name_index = column_index(&headers, NAME_COLUMN).ok();

    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    let mut summary = ScoreSummary::default();
    let mut record = StringRecord::new();

    while csv_reader.read_record(&mut record)? {
        summary.rows += 1;
        let row = summary.rows;
        let text = record.get(text_index).unwrap_or_default().trim();

        let assessment = match scorer.assess(ReviewInput::new(text)) {
            Ok(assessment) => assessment,
            Err(AssessmentError::InvalidInput(_)) => {
                warn!(row, "skipping review without text");
                summary.skipped += 1;
                continue;
            }
        };
        let features = extract_features(text);

        let scored = ScoredReview {
            row,
            name: name_index
                .and_then(|index| record.get(index))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            quality_score: assessment.quality_score,
            relevancy_score: assessment.relevancy_score,
            advertisement: assessment.policy_violations.advertisement,
            irrelevant_content: assessment.policy_violations.irrelevant_content,
            rant_without_visit: assessment.policy_violations.rant_without_visit,
            text_length: assessment.metadata.text_length,
            word_count: features.word_count,
            sentiment_score: features.sentiment.sentiment_score,
            detected_language: features.detected_language.code(),
            has_url: features.has_url,
            has_email: features.has_email,
            has_phone: features.has_phone,
        };
        csv_writer.serialize(&scored)?;
        summary.record(&scored);
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    info!(
        rows = summary.rows,
        scored = summary.scored,
        skipped = summary.skipped,
        "batch scoring finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_rows_and_skips_blank_text() {
        let input = "name,review_text,stars\n\
                     Ana,\"Great noodles, friendly staff and a comfortable booth\",5\n\
                     Ben,   ,3\n\
                     Cy,听说这里很差 www.deal.cn 有优惠,1\n";
        let mut output = Vec::new();

        let summary = score_reviews(&ReviewScorer::default(), input.as_bytes(), &mut output)
            .expect("scoring runs");

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.scored, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.advertisement, 1);
        assert_eq!(summary.rant_without_visit, 1);

        let written = String::from_utf8(output).expect("utf8");
        let mut lines = written.lines();
        assert!(lines
            .next()
            .unwrap_or_default()
            .starts_with("row,name,quality_score,relevancy_score,advertisement"));
        assert!(lines.next().unwrap_or_default().starts_with("1,Ana,0.85,0.8,false"));
        assert!(lines.next().unwrap_or_default().starts_with("3,Cy,"));
    }

    #[test]
    fn review_text_column_is_required() {
        match score_reviews(&ReviewScorer::default(), "name,text\nAna,ok\n".as_bytes(), Vec::new())
        {
            Err(DatasetError::MissingColumn(column)) => assert_eq!(column, REVIEW_TEXT_COLUMN),
            other => panic!("expected missing column, got {other:?}"),
        }
    }
}
