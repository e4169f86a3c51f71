use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::claims::domain::{CancellationInput, WeatherInference, WeatherSeverity};
use crate::claims::service::{ClaimReviewRequest, ClaimReviewService};
use crate::claims::summary::{SummaryError, Summarizer};
use crate::claims::weather::WeatherClassifier;

pub(super) fn input(
    weather_severity: WeatherSeverity,
    participant_yes_ratio: f64,
    hours_before_event: f64,
    organizer_cancellation_rate: f64,
) -> CancellationInput {
    CancellationInput {
        reason: String::new(),
        weather_severity,
        participant_yes_ratio,
        hours_before_event,
        organizer_cancellation_rate,
    }
}

pub(super) fn review_request() -> ClaimReviewRequest {
    ClaimReviewRequest {
        reason: Some("Heavy rain flooded the venue".to_string()),
        weather: Some("light".to_string()),
        yes_ratio: Some("80".to_string()),
        hours_before: Some("1".to_string()),
        org_rate: Some("2".to_string()),
        event_date: None,
        lat: None,
        lon: None,
    }
}

pub(super) fn with_location(mut request: ClaimReviewRequest) -> ClaimReviewRequest {
    request.event_date = Some("2025-02-20".to_string());
    request.lat = Some("12.9716".to_string());
    request.lon = Some("77.5946".to_string());
    request
}

/// Classifier returning a fixed answer and recording every lookup.
#[derive(Default)]
pub(super) struct StubWeather {
    pub(super) answer: Option<WeatherInference>,
    pub(super) calls: Mutex<Vec<(f64, f64, NaiveDate)>>,
}

impl StubWeather {
    pub(super) fn reporting(severity: WeatherSeverity, max_rain_mm: f64) -> Self {
        Self {
            answer: Some(WeatherInference {
                severity,
                max_rain_mm,
                peak_time: Some("2025-02-20T18:00".to_string()),
                explanation: format!("stub archive saw {max_rain_mm:.1} mm/h"),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn offline() -> Self {
        Self::default()
    }

    pub(super) fn calls(&self) -> Vec<(f64, f64, NaiveDate)> {
        self.calls.lock().expect("weather mutex poisoned").clone()
    }
}

#[async_trait]
impl WeatherClassifier for StubWeather {
    async fn classify(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Option<WeatherInference> {
        self.calls
            .lock()
            .expect("weather mutex poisoned")
            .push((latitude, longitude, date));
        self.answer.clone()
    }
}

/// Summarizer that echoes a canned reply, or fails when `reply` is `None`.
#[derive(Default)]
pub(super) struct StubSummarizer {
    pub(super) reply: Option<String>,
    pub(super) prompts: Mutex<Vec<String>>,
}

impl StubSummarizer {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing() -> Self {
        Self::default()
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("summary mutex poisoned").clone()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummaryError> {
        self.prompts
            .lock()
            .expect("summary mutex poisoned")
            .push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| SummaryError::Rejected("quota exceeded".to_string()))
    }
}

pub(super) fn build_service(
    weather: StubWeather,
    summarizer: Option<StubSummarizer>,
) -> (
    ClaimReviewService<StubWeather, StubSummarizer>,
    Arc<StubWeather>,
    Option<Arc<StubSummarizer>>,
) {
    let weather = Arc::new(weather);
    let summarizer = summarizer.map(Arc::new);
    let service = ClaimReviewService::new(weather.clone(), summarizer.clone());
    (service, weather, summarizer)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
