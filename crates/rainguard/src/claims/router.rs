use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::CancellationInput;
use super::evaluation::evaluate;
use super::service::{ClaimReviewRequest, ClaimReviewService};
use super::summary::Summarizer;
use super::weather::WeatherClassifier;

/// Router builder exposing the claim review endpoints.
pub fn claims_router<W, S>(service: Arc<ClaimReviewService<W, S>>) -> Router
where
    W: WeatherClassifier + 'static,
    S: Summarizer + 'static,
{
    Router::new()
        .route("/api/v1/claims/review", get(review_handler::<W, S>))
        .route("/api/v1/claims/evaluate", post(evaluate_handler))
        .with_state(service)
}

pub(crate) async fn review_handler<W, S>(
    State(service): State<Arc<ClaimReviewService<W, S>>>,
    Query(request): Query<ClaimReviewRequest>,
) -> Response
where
    W: WeatherClassifier + 'static,
    S: Summarizer + 'static,
{
    if !request.has_input() {
        let payload = json!({
            "error": "provide at least one claim field (reason, yesRatio, hoursBefore, orgRate, eventDate, lat, lon)",
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let report = service.review(&request).await;
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn evaluate_handler(Json(input): Json<CancellationInput>) -> Response {
    (StatusCode::OK, Json(evaluate(&input))).into_response()
}
