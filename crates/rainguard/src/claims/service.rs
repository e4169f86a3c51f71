use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{CancellationInput, WeatherSeverity, WeatherSource};
use super::evaluation::{evaluate, CancellationEvaluation};
use super::summary::{
    build_prompt, SummaryContext, Summarizer, SUMMARY_NOT_CONFIGURED, SUMMARY_UNAVAILABLE,
};
use super::weather::WeatherClassifier;

pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable; using manual weather severity.";
pub const WEATHER_LOOKUP_SKIPPED: &str =
    "Weather lookup skipped: event date or coordinates are invalid; using manual weather severity.";

/// Raw claim review form fields, all optional and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReviewRequest {
    #[serde(default)]
    pub reason: Option<String>,
    /// Manual severity used when no automatic lookup succeeds.
    #[serde(default)]
    pub weather: Option<String>,
    /// Percentage of participants confirming the cancellation.
    #[serde(default)]
    pub yes_ratio: Option<String>,
    #[serde(default)]
    pub hours_before: Option<String>,
    /// Organizer's historical cancellation rate, as a percentage.
    #[serde(default)]
    pub org_rate: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Read the longest leading decimal number, ignoring trailing text (`"50%"` is 50).
fn leading_number(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if has_digits || frac_end > end + 1 {
            end = frac_end;
            has_digits = true;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

fn parse_number(field: &Option<String>) -> Option<f64> {
    present(field).and_then(leading_number)
}

fn percent_to_ratio(field: &Option<String>) -> f64 {
    parse_number(field)
        .map(|percent| (percent / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Empty means zero hours; text with no leading number stays NaN so timing stays neutral.
fn hours_before(field: &Option<String>) -> f64 {
    match present(field) {
        None => 0.0,
        Some(raw) => leading_number(raw).map_or(f64::NAN, |hours| hours.max(0.0)),
    }
}

impl ClaimReviewRequest {
    /// `true` when at least one scoring or lookup field was supplied.
    pub fn has_input(&self) -> bool {
        [
            &self.reason,
            &self.yes_ratio,
            &self.hours_before,
            &self.org_rate,
            &self.event_date,
            &self.lat,
            &self.lon,
        ]
        .into_iter()
        .any(|field| present(field).is_some())
    }

    pub fn manual_severity(&self) -> WeatherSeverity {
        present(&self.weather)
            .map(WeatherSeverity::from_form)
            .unwrap_or_default()
    }

    /// Clamp the form fields into the ranges the evaluator expects.
    pub fn to_input(&self, weather_severity: WeatherSeverity) -> CancellationInput {
        CancellationInput {
            reason: present(&self.reason).unwrap_or_default().to_string(),
            weather_severity,
            participant_yes_ratio: percent_to_ratio(&self.yes_ratio),
            hours_before_event: hours_before(&self.hours_before),
            organizer_cancellation_rate: percent_to_ratio(&self.org_rate),
        }
    }

    fn weather_lookup(&self) -> WeatherLookup {
        let (Some(date), Some(lat), Some(lon)) = (
            present(&self.event_date),
            present(&self.lat),
            present(&self.lon),
        ) else {
            return WeatherLookup::NotRequested;
        };

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        let lat = leading_number(lat).filter(|value| value.is_finite());
        let lon = leading_number(lon).filter(|value| value.is_finite());
        match (date, lat, lon) {
            (Some(date), Some(latitude), Some(longitude)) => WeatherLookup::Ready {
                latitude,
                longitude,
                date,
            },
            _ => WeatherLookup::Invalid,
        }
    }
}

enum WeatherLookup {
    NotRequested,
    Invalid,
    Ready {
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    },
}

/// Outcome of a claim review, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReviewReport {
    pub reason: String,
    pub weather_used: WeatherSeverity,
    pub weather_source: WeatherSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_evidence: Option<String>,
    pub input: CancellationInput,
    pub evaluation: CancellationEvaluation,
    pub ai_summary: String,
}

/// Pipeline composing the weather cross-check, rule engine and analyst summary.
pub struct ClaimReviewService<W, S> {
    weather: Arc<W>,
    summarizer: Option<Arc<S>>,
}

impl<W, S> ClaimReviewService<W, S>
where
    W: WeatherClassifier + 'static,
    S: Summarizer + 'static,
{
    pub fn new(weather: Arc<W>, summarizer: Option<Arc<S>>) -> Self {
        Self {
            weather,
            summarizer,
        }
    }

    /// Review a claim. Never fails; external lookups degrade to fallback text.
    pub async fn review(&self, request: &ClaimReviewRequest) -> ClaimReviewReport {
        let manual = request.manual_severity();
        let (weather_used, weather_source, weather_evidence) =
            match request.weather_lookup() {
                WeatherLookup::NotRequested => (manual, WeatherSource::Manual, None),
                WeatherLookup::Invalid => (
                    manual,
                    WeatherSource::Manual,
                    Some(WEATHER_LOOKUP_SKIPPED.to_string()),
                ),
                WeatherLookup::Ready {
                    latitude,
                    longitude,
                    date,
                } => match self.weather.classify(latitude, longitude, date).await {
                    Some(inference) => (
                        inference.severity,
                        WeatherSource::Automatic,
                        Some(inference.explanation),
                    ),
                    None => (
                        manual,
                        WeatherSource::Manual,
                        Some(WEATHER_UNAVAILABLE.to_string()),
                    ),
                },
            };

        let input = request.to_input(weather_used);
        let evaluation = evaluate(&input);

        info!(
            score = evaluation.reliability_score,
            decision = evaluation.decision.label(),
            weather = %weather_used,
            source = ?weather_source,
            "cancellation claim evaluated"
        );

        let ai_summary = match &self.summarizer {
            None => SUMMARY_NOT_CONFIGURED.to_string(),
            Some(summarizer) => {
                let prompt = build_prompt(&SummaryContext {
                    reason: &input.reason,
                    weather_used,
                    weather_evidence: weather_evidence.as_deref(),
                    evaluation: &evaluation,
                });
                match summarizer.summarize(&prompt).await {
                    Ok(summary) => summary,
                    Err(err) => {
                        warn!(error = %err, "claim summary unavailable");
                        SUMMARY_UNAVAILABLE.to_string()
                    }
                }
            }
        };

        ClaimReviewReport {
            reason: input.reason.clone(),
            weather_used,
            weather_source,
            weather_evidence,
            input,
            evaluation,
            ai_summary,
        }
    }
}
