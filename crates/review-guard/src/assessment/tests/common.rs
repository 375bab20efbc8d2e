use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::{json, Map, Value};

use crate::assessment::{IntakePolicy, ReviewAssessmentService, ReviewScorer};

pub(super) const ADVERT_RANT: &str =
    "This place is terrible and dirty, never been there myself but heard that www.example.com has discount";

pub(super) fn service() -> ReviewAssessmentService {
    service_with_limit(IntakePolicy::default().max_review_length)
}

pub(super) fn service_with_limit(max_review_length: usize) -> ReviewAssessmentService {
    ReviewAssessmentService::new(
        Arc::new(ReviewScorer::default()),
        IntakePolicy { max_review_length },
    )
}

pub(super) fn location_metadata() -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("place_id".to_string(), json!("cafe-042"));
    metadata.insert("stars".to_string(), json!(2));
    metadata
}

pub(super) async fn json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
