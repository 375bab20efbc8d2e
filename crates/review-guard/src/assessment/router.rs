use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use super::domain::{ReviewInput, MODEL_VERSION};
use super::report::EvaluationRequest;
use super::scorer::AssessmentError;
use super::service::{EvaluationError, ReviewAssessmentService};

pub const SERVICE_NAME: &str = "Review Assessment Service";

#[derive(Debug, Deserialize)]
pub(crate) struct PredictRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeaturesRequest {
    #[serde(default)]
    text: Option<String>,
}

/// Router exposing the machine-facing `/ml-api` and user-facing `/api` endpoints.
pub fn review_router(service: Arc<ReviewAssessmentService>) -> Router {
    Router::new()
        .route("/ml-api/predict", post(predict_handler))
        .route("/ml-api/features", post(features_handler))
        .route("/ml-api/health", get(ml_health_handler))
        .route("/ml-api/model-info", get(model_info_handler))
        .route("/api/evaluate-review", post(evaluate_handler))
        .route("/api/health", get(api_health_handler))
        .fallback(not_found_handler)
        .with_state(service)
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn ml_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<ReviewAssessmentService>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return ml_error(StatusCode::BAD_REQUEST, "No JSON data provided");
    };

    let input = ReviewInput {
        text: request.text.unwrap_or_default(),
        metadata: request.metadata,
    };

    match service.predict(input) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(AssessmentError::InvalidInput(_)) => {
            ml_error(StatusCode::BAD_REQUEST, "Text field is required")
        }
    }
}

pub(crate) async fn features_handler(
    State(service): State<Arc<ReviewAssessmentService>>,
    payload: Result<Json<FeaturesRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return ml_error(StatusCode::BAD_REQUEST, "No JSON data provided");
    };

    match service.features(request.text.as_deref().unwrap_or_default()) {
        Ok(features) => (StatusCode::OK, Json(features)).into_response(),
        Err(AssessmentError::InvalidInput(_)) => {
            ml_error(StatusCode::BAD_REQUEST, "Text field is required")
        }
    }
}

pub(crate) async fn ml_health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": MODEL_VERSION,
        "timestamp": Local::now().to_rfc3339(),
    }))
}

pub(crate) async fn model_info_handler(
    State(service): State<Arc<ReviewAssessmentService>>,
) -> Response {
    Json(service.model_info()).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<ReviewAssessmentService>>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected evaluation body");
            EvaluationRequest::default()
        }
    };

    match service.evaluate(request) {
        Ok(report) => {
            let payload = json!({
                "status": "success",
                "data": report,
                "message": "review evaluated",
                "timestamp": timestamp(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => {
            let status = match error {
                EvaluationError::MissingReviewText
                | EvaluationError::TooLong { .. }
                | EvaluationError::Assessment(AssessmentError::InvalidInput(_)) => {
                    StatusCode::BAD_REQUEST
                }
            };
            let payload = json!({
                "status": "error",
                "message": error.to_string(),
                "timestamp": timestamp(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn api_health_handler() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "API service is running",
        "timestamp": timestamp(),
    }))
}

pub(crate) async fn not_found_handler(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    warn!(%method, path = uri.path(), "route not found");
    let payload = json!({
        "status": "error",
        "message": "requested API endpoint does not exist",
        "path": uri.path(),
        "method": method.as_str(),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}
