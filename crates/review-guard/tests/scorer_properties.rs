//! Behavioural guarantees of the rule-based scorer exercised through the public API.

use std::sync::Arc;

use proptest::prelude::*;
use review_guard::assessment::{
    AssessmentError, KeywordLexicon, LexiconCategory, PolicyViolations, ReviewInput, ReviewScorer,
};

fn scorer() -> ReviewScorer {
    ReviewScorer::default()
}

fn assess(text: &str) -> review_guard::assessment::AssessmentResult {
    scorer()
        .assess(ReviewInput::new(text))
        .expect("non-empty text assesses")
}

#[test]
fn keyword_free_text_scores_base_values() {
    let hundred = "x".repeat(100);
    for text in [
        "Ten chars.",
        "We came by on Tuesday and ordered the set menu for two.",
        hundred.as_str(),
    ] {
        let result = assess(text);
        assert_eq!(result.quality_score, 0.7, "quality for {text:?}");
        assert_eq!(result.relevancy_score, 0.8, "relevancy for {text:?}");
        assert_eq!(result.policy_violations, PolicyViolations::default());
    }
}

#[test]
fn length_boundaries() {
    assert_eq!(assess(&"x".repeat(9)).quality_score, 0.5);
    assert_eq!(assess(&"x".repeat(10)).quality_score, 0.7);
    assert_eq!(assess(&"x".repeat(100)).quality_score, 0.7);
    assert_eq!(assess(&"x".repeat(101)).quality_score, 0.8);
}

#[test]
fn spam_only_flags_advertisement() {
    let result = assess("see the menu at http://menu.example");
    assert_eq!(
        result.policy_violations,
        PolicyViolations {
            advertisement: true,
            irrelevant_content: false,
            rant_without_visit: false,
        }
    );
}

#[test]
fn matching_ignores_case() {
    let upper = assess("The soup was GREAT today");
    let lower = assess("The soup was great today");
    assert_eq!(upper.quality_score, lower.quality_score);
    assert_eq!(upper.quality_score, 0.75);
}

#[test]
fn repeated_calls_agree() {
    let text = "Heard that the 汽车 show nearby makes it noisy";
    let first = assess(text);
    let second = assess(text);
    assert_eq!(first.quality_score, second.quality_score);
    assert_eq!(first.relevancy_score, second.relevancy_score);
    assert_eq!(first.policy_violations, second.policy_violations);
    assert_eq!(first.metadata.text_length, second.metadata.text_length);
}

#[test]
fn advert_and_rant_example() {
    let text =
        "This place is terrible and dirty, never been there myself but heard that www.example.com has discount";
    let result = assess(text);

    assert_eq!(result.metadata.text_length, 101);
    assert!(result.policy_violations.advertisement);
    assert!(result.policy_violations.rant_without_visit);
    assert!(!result.policy_violations.irrelevant_content);
    // 0.70 - 2 negatives - 2 spam + long text bonus
    assert_eq!(result.quality_score, 0.2);
    assert_eq!(result.relevancy_score, 0.8);

    let breakdown = scorer().explain(text).expect("valid");
    let spam: Vec<_> = breakdown
        .quality
        .iter()
        .filter_map(|adjustment| adjustment.keyword.as_deref())
        .filter(|keyword| ["www.", "discount"].contains(keyword))
        .collect();
    assert_eq!(spam.len(), 2);
}

#[test]
fn substring_matching_has_no_word_boundaries() {
    let lexicon = KeywordLexicon::from_parts([(LexiconCategory::Negative, vec!["bad"])])
        .expect("lexicon builds");
    let scorer = ReviewScorer::new(Arc::new(lexicon));
    let result = scorer
        .assess(ReviewInput::new("They gave me a badge at the door"))
        .expect("valid");
    assert_eq!(result.quality_score, 0.6);
}

#[test]
fn every_keyword_at_once_stays_in_bounds() {
    let lexicon = KeywordLexicon::standard();
    let everything: Vec<&str> = LexiconCategory::ALL
        .into_iter()
        .flat_map(|category| lexicon.keywords(category).iter().map(String::as_str))
        .collect();
    let result = assess(&everything.join(" "));

    assert_eq!(result.relevancy_score, 0.0);
    assert!((0.0..=1.0).contains(&result.quality_score));
    assert!(result.policy_violations.advertisement);
    assert!(result.policy_violations.irrelevant_content);
    assert!(result.policy_violations.rant_without_visit);
}

#[test]
fn empty_text_is_invalid_input() {
    assert!(matches!(
        scorer().assess(ReviewInput::new("")),
        Err(AssessmentError::InvalidInput(_))
    ));
}

proptest! {
    #[test]
    fn scores_always_within_unit_interval(text in "\\PC{1,300}") {
        prop_assume!(!text.trim().is_empty());
        let result = scorer().assess(ReviewInput::new(text)).expect("valid input");
        prop_assert!((0.0..=1.0).contains(&result.quality_score));
        prop_assert!((0.0..=1.0).contains(&result.relevancy_score));
    }

    #[test]
    fn keyword_soup_stays_within_unit_interval(
        picks in proptest::collection::vec(0usize..64, 1..40)
    ) {
        let lexicon = KeywordLexicon::standard();
        let words: Vec<&str> = LexiconCategory::ALL
            .into_iter()
            .flat_map(|category| lexicon.keywords(category).iter().map(String::as_str))
            .collect();
        let text: Vec<&str> = picks.iter().map(|index| words[index % words.len()]).collect();
        let result = scorer().assess(ReviewInput::new(text.join(" "))).expect("valid input");
        prop_assert!((0.0..=1.0).contains(&result.quality_score));
        prop_assert!((0.0..=1.0).contains(&result.relevancy_score));
    }
}
