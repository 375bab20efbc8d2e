use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use review_guard::assessment::{KeywordLexicon, ReviewScorer};
use review_guard::config::ReviewConfig;
use review_guard::error::AppError;
use serde_json::{json, Map, Value};
use std::any::Any;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::{error, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the shared scorer, loading the configured lexicon file when one is set.
pub(crate) fn build_scorer(config: &ReviewConfig) -> Result<Arc<ReviewScorer>, AppError> {
    let lexicon = match &config.lexicon_path {
        Some(path) => {
            let lexicon = KeywordLexicon::from_path(path)?;
            info!(path = %path.display(), "loaded keyword lexicon");
            lexicon
        }
        None => KeywordLexicon::standard(),
    };

    Ok(Arc::new(ReviewScorer::new(Arc::new(lexicon))))
}

pub(crate) fn parse_metadata(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("metadata must be a JSON object".to_string()),
        Err(err) => Err(format!("failed to parse metadata as JSON ({err})")),
    }
}

pub(crate) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Converts a handler panic into the JSON 500 body clients expect.
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown failure".to_string()
    };

    error!(%message, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_guard::assessment::LexiconCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn metadata_must_be_an_object() {
        let map = parse_metadata(r#"{"city": "Lisbon"}"#).expect("object parses");
        assert_eq!(map["city"], "Lisbon");
        assert!(parse_metadata("\"Lisbon\"").is_err());
        assert!(parse_metadata("{broken").is_err());
    }

    #[test]
    fn scorer_uses_standard_lexicon_without_path() {
        let config = ReviewConfig {
            max_review_length: 5000,
            lexicon_path: None,
        };
        let scorer = build_scorer(&config).expect("standard lexicon");
        assert!(scorer
            .lexicon()
            .keywords(LexiconCategory::Spam)
            .contains("discount"));
    }

    #[test]
    fn scorer_loads_lexicon_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"positive": ["cozy"], "negative": [], "spam": [], "irrelevant": [], "rant_without_visit": []}}"#
        )
        .expect("write lexicon");
        let config = ReviewConfig {
            max_review_length: 5000,
            lexicon_path: Some(file.path().to_path_buf()),
        };

        let scorer = build_scorer(&config).expect("lexicon loads");
        assert!(scorer
            .lexicon()
            .keywords(LexiconCategory::Positive)
            .contains("cozy"));
        assert!(scorer.lexicon().keywords(LexiconCategory::Spam).is_empty());
    }

    #[test]
    fn missing_lexicon_file_is_an_error() {
        let config = ReviewConfig {
            max_review_length: 5000,
            lexicon_path: Some("/nonexistent/lexicon.json".into()),
        };
        assert!(matches!(build_scorer(&config), Err(AppError::Lexicon(_))));
    }
}
