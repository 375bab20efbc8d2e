use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Han}\w\s.,!?;:]").expect("valid regex"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

const STOP_WORDS_ZH: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这",
];

const STOP_WORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should",
];

/// Lower-case, collapse whitespace and strip symbols outside word characters
/// and basic punctuation.
pub fn preprocess(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let stripped = DISALLOWED.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS_ZH.contains(&word) || STOP_WORDS_EN.contains(&word)
}

/// Most frequent non-stop-word tokens, ties broken by first occurrence.
pub fn extract_keywords(text: &str, top_k: usize) -> Vec<String> {
    let processed = preprocess(text);

    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for token in WORD.find_iter(&processed).map(|found| found.as_str()) {
        if token.chars().count() <= 1 || is_stop_word(token) {
            continue;
        }
        match positions.get(token) {
            Some(&index) => order[index].1 += 1,
            None => {
                positions.insert(token, order.len());
                order.push((token, 1));
            }
        }
    }

    // stable sort keeps first-occurrence order among equal counts
    order.sort_by(|left, right| right.1.cmp(&left.1));
    order
        .into_iter()
        .take(top_k)
        .map(|(word, _)| word.to_string())
        .collect()
}
