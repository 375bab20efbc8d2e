use serde::{Deserialize, Serialize};

use super::normalize::preprocess;

const POSITIVE_WORDS: &[&str] = &[
    "好", "棒", "优秀", "满意", "喜欢", "推荐", "美味", "舒适", "干净", "友好", "专业", "快速",
    "便宜", "值得", "good", "great", "excellent", "amazing", "wonderful", "fantastic", "awesome",
    "perfect", "love", "like", "recommend", "satisfied",
];

const NEGATIVE_WORDS: &[&str] = &[
    "差", "糟糕", "失望", "不好", "难吃", "脏", "吵", "贵", "慢", "态度差", "服务差", "质量差",
    "bad", "terrible", "awful", "horrible", "disappointing", "poor", "worst", "hate", "dislike",
    "expensive", "slow", "dirty",
];

const LABEL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// Lexicon polarity counts for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub positive_words: usize,
    pub negative_words: usize,
    pub confidence: f64,
}

fn occurrences(text: &str, words: &[&str]) -> usize {
    words.iter().map(|word| text.matches(word).count()).sum()
}

pub fn analyze_sentiment(text: &str) -> SentimentAnalysis {
    let processed = preprocess(text);
    let positive_words = occurrences(&processed, POSITIVE_WORDS);
    let negative_words = occurrences(&processed, NEGATIVE_WORDS);

    let total = positive_words + negative_words;
    let sentiment_score = if total == 0 {
        0.0
    } else {
        (positive_words as f64 - negative_words as f64) / total as f64
    };

    let sentiment_label = if sentiment_score > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if sentiment_score < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentAnalysis {
        sentiment_score,
        sentiment_label,
        positive_words,
        negative_words,
        confidence: (sentiment_score.abs() + 0.1).min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_when_no_sentiment_words() {
        let analysis = analyze_sentiment("We arrived at seven and left at nine.");
        assert_eq!(analysis.sentiment_label, SentimentLabel::Neutral);
        assert_eq!(analysis.sentiment_score, 0.0);
        assert_eq!(analysis.confidence, 0.1);
    }

    #[test]
    fn counts_every_occurrence() {
        let analysis = analyze_sentiment("The food was terrible and the service was awful.");
        assert_eq!(analysis.positive_words, 0);
        assert_eq!(analysis.negative_words, 2);
        assert_eq!(analysis.sentiment_label, SentimentLabel::Negative);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn chinese_review_reads_positive() {
        let analysis = analyze_sentiment("这家餐厅的服务很好，食物也很美味。环境很舒适，推荐大家来试试。");
        assert!(analysis.positive_words >= 4);
        assert_eq!(analysis.negative_words, 0);
        assert_eq!(analysis.sentiment_label, SentimentLabel::Positive);
    }
}
