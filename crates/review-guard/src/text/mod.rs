//! Lightweight review text features: normalisation, keyword extraction,
//! lexicon sentiment and contact/link pattern detection.

mod normalize;
mod sentiment;

pub use normalize::{extract_keywords, is_stop_word, preprocess};
pub use sentiment::{analyze_sentiment, SentimentAnalysis, SentimentLabel};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const FEATURE_KEYWORDS: usize = 5;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?。！？]").expect("valid regex"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://|www\.").expect("valid regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectedLanguage {
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "unknown")]
    Unknown,
}

impl DetectedLanguage {
    pub fn code(self) -> &'static str {
        match self {
            DetectedLanguage::Chinese => "zh",
            DetectedLanguage::English => "en",
            DetectedLanguage::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub text_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub detected_language: DetectedLanguage,
    pub keywords: Vec<String>,
    pub sentiment: SentimentAnalysis,
    pub has_url: bool,
    pub has_email: bool,
    pub has_phone: bool,
    pub chinese_char_ratio: f64,
    pub english_char_ratio: f64,
}

fn is_cjk(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

pub fn extract_features(text: &str) -> TextFeatures {
    let processed = preprocess(text);

    let text_length = text.chars().count();
    let word_count = processed.split_whitespace().count();
    // counts segments, so trailing punctuation yields an empty final segment
    let sentence_count = SENTENCE_BREAK.split(text).count();

    let chinese_chars = text.chars().filter(|ch| is_cjk(*ch)).count();
    let english_chars = text.chars().filter(char::is_ascii_alphabetic).count();
    let detected_language = if chinese_chars > english_chars {
        DetectedLanguage::Chinese
    } else if english_chars > 0 {
        DetectedLanguage::English
    } else {
        DetectedLanguage::Unknown
    };

    let denominator = text_length.max(1) as f64;

    TextFeatures {
        text_length,
        word_count,
        sentence_count,
        avg_word_length: text_length as f64 / word_count.max(1) as f64,
        detected_language,
        keywords: extract_keywords(text, FEATURE_KEYWORDS),
        sentiment: analyze_sentiment(text),
        has_url: URL.is_match(text),
        has_email: EMAIL.is_match(text),
        has_phone: PHONE.is_match(text),
        chinese_char_ratio: chinese_chars as f64 / denominator,
        english_char_ratio: english_chars as f64 / denominator,
    }
}
