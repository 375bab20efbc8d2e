use crate::infra::{build_scorer, parse_metadata};
use clap::Args;
use review_guard::assessment::{ReviewAssessmentService, ReviewInput};
use review_guard::config::AppConfig;
use review_guard::dataset::{clean_translations_file, score_reviews_file};
use review_guard::error::AppError;
use review_guard::telemetry;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Review text to score
    #[arg(long)]
    pub(crate) text: String,
    /// Optional JSON object echoed back in the assessment metadata
    #[arg(long, value_parser = parse_metadata)]
    pub(crate) metadata: Option<Map<String, Value>>,
    /// Also print every score adjustment behind the result
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct FeaturesArgs {
    /// Review text to analyse
    #[arg(long)]
    pub(crate) text: String,
}

#[derive(Args, Debug)]
pub(crate) struct DatasetArgs {
    /// Source CSV export
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination CSV file, overwritten if present
    #[arg(long)]
    pub(crate) output: PathBuf,
}

fn load_service() -> Result<ReviewAssessmentService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let scorer = build_scorer(&config.review)?;
    Ok(ReviewAssessmentService::new(
        scorer,
        config.review.intake_policy(),
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        text,
        metadata,
        explain,
    } = args;

    let service = load_service()?;
    let mut input = ReviewInput::new(text.as_str());
    input.metadata = metadata;
    let result = service.predict(input)?;
    print_json(&result)?;

    if explain {
        let breakdown = service.scorer().explain(text.trim())?;
        println!("\nScore adjustments");
        for adjustment in breakdown.quality.iter() {
            println!(
                "- quality {:+.2} {:?}{}",
                adjustment.delta(),
                adjustment.signal,
                keyword_suffix(adjustment.keyword.as_deref())
            );
        }
        for adjustment in breakdown.relevancy.iter() {
            println!(
                "- relevancy {:+.2} {:?}{}",
                adjustment.delta(),
                adjustment.signal,
                keyword_suffix(adjustment.keyword.as_deref())
            );
        }
        let detected: Vec<&str> = breakdown
            .policy_violations
            .detected()
            .into_iter()
            .map(|policy| policy.display_name())
            .collect();
        if detected.is_empty() {
            println!("No policy violations detected");
        } else {
            println!("Policy violations: {}", detected.join(", "));
        }
    }

    Ok(())
}

fn keyword_suffix(keyword: Option<&str>) -> String {
    keyword
        .map(|keyword| format!(" ({keyword})"))
        .unwrap_or_default()
}

pub(crate) fn run_features(args: FeaturesArgs) -> Result<(), AppError> {
    let service = load_service()?;
    let features = service.features(&args.text)?;
    print_json(&features)
}

pub(crate) fn run_dataset_clean(args: DatasetArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let summary = clean_translations_file(&args.input, &args.output)?;
    println!(
        "Cleaned {} rows ({} translated) into {}",
        summary.rows,
        summary.translated,
        args.output.display()
    );
    Ok(())
}

pub(crate) fn run_dataset_score(args: DatasetArgs) -> Result<(), AppError> {
    let service = load_service()?;

    let summary = score_reviews_file(service.scorer(), &args.input, &args.output)?;
    println!(
        "Scored {} of {} rows into {} ({} skipped without text)",
        summary.scored,
        summary.rows,
        args.output.display(),
        summary.skipped
    );
    println!(
        "- {} advertisement | {} irrelevant content | {} rant without visit",
        summary.advertisement, summary.irrelevant_content, summary.rant_without_visit
    );
    Ok(())
}
