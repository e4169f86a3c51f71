use super::common::*;
use chrono::NaiveDate;

use crate::claims::domain::{WeatherSeverity, WeatherSource};
use crate::claims::evaluation::CancellationDecision;
use crate::claims::service::{ClaimReviewRequest, WEATHER_LOOKUP_SKIPPED, WEATHER_UNAVAILABLE};
use crate::claims::summary::{SUMMARY_NOT_CONFIGURED, SUMMARY_UNAVAILABLE};

#[test]
fn percentages_are_converted_and_clamped() {
    let request = ClaimReviewRequest {
        yes_ratio: Some("150".to_string()),
        hours_before: Some("-4".to_string()),
        org_rate: Some("-10".to_string()),
        ..ClaimReviewRequest::default()
    };

    let input = request.to_input(WeatherSeverity::None);

    assert_eq!(input.participant_yes_ratio, 1.0);
    assert_eq!(input.hours_before_event, 0.0);
    assert_eq!(input.organizer_cancellation_rate, 0.0);
}

#[test]
fn unparsable_numbers_default_to_zero() {
    let request = ClaimReviewRequest {
        yes_ratio: Some("most".to_string()),
        hours_before: Some("".to_string()),
        org_rate: Some("NaN".to_string()),
        ..ClaimReviewRequest::default()
    };

    let input = request.to_input(WeatherSeverity::Light);

    assert_eq!(input.participant_yes_ratio, 0.0);
    assert_eq!(input.hours_before_event, 0.0);
    assert_eq!(input.organizer_cancellation_rate, 0.0);
    assert_eq!(input.weather_severity, WeatherSeverity::Light);
}

#[test]
fn numbers_are_read_from_their_leading_digits() {
    let request = ClaimReviewRequest {
        yes_ratio: Some("50%".to_string()),
        hours_before: Some("3.5 hours".to_string()),
        org_rate: Some(" 12.5e0 percent".to_string()),
        ..ClaimReviewRequest::default()
    };

    let input = request.to_input(WeatherSeverity::None);

    assert_eq!(input.participant_yes_ratio, 0.5);
    assert_eq!(input.hours_before_event, 3.5);
    assert_eq!(input.organizer_cancellation_rate, 0.125);
}

#[test]
fn non_numeric_hours_leave_timing_neutral() {
    let request = ClaimReviewRequest {
        weather: Some("none".to_string()),
        yes_ratio: Some("50%".to_string()),
        hours_before: Some("soon".to_string()),
        org_rate: Some("10".to_string()),
        ..ClaimReviewRequest::default()
    };

    let input = request.to_input(request.manual_severity());
    assert!(input.hours_before_event.is_nan());

    let evaluation = crate::claims::evaluation::evaluate(&input);
    // 50 - 15 + 10
    assert_eq!(evaluation.reliability_score, 45);
    assert_eq!(evaluation.decision, CancellationDecision::Uncertain);
    assert_eq!(evaluation.factor_notes.len(), 2);
    assert!(evaluation
        .factor_notes
        .iter()
        .all(|note| !note.starts_with("Cancellation close to event time")));
}

#[tokio::test]
async fn coordinates_with_trailing_text_still_trigger_lookup() {
    let (service, weather, _) =
        build_service(StubWeather::reporting(WeatherSeverity::Heavy, 8.0), None);
    let mut request = with_location(review_request());
    request.lat = Some("12.9716N".to_string());

    let report = service.review(&request).await;

    assert_eq!(weather.calls().len(), 1);
    assert_eq!(weather.calls()[0].0, 12.9716);
    assert_eq!(report.weather_source, WeatherSource::Automatic);
}

#[test]
fn empty_request_has_no_input() {
    assert!(!ClaimReviewRequest::default().has_input());

    let request = ClaimReviewRequest {
        weather: Some("storm".to_string()),
        reason: Some("   ".to_string()),
        ..ClaimReviewRequest::default()
    };
    assert!(!request.has_input());
    assert_eq!(request.manual_severity(), WeatherSeverity::Storm);
}

#[tokio::test]
async fn manual_severity_is_used_without_location() {
    let (service, weather, _) = build_service(StubWeather::offline(), None);

    let report = service.review(&review_request()).await;

    assert!(weather.calls().is_empty());
    assert_eq!(report.weather_used, WeatherSeverity::Light);
    assert_eq!(report.weather_source, WeatherSource::Manual);
    assert!(report.weather_evidence.is_none());
    // 50 + 5 + 25 + 10 + 10
    assert_eq!(report.evaluation.reliability_score, 100);
    assert_eq!(report.ai_summary, SUMMARY_NOT_CONFIGURED);
}

#[tokio::test]
async fn archive_severity_overrides_manual_choice() {
    let (service, weather, _) =
        build_service(StubWeather::reporting(WeatherSeverity::None, 0.2), None);
    let mut request = with_location(review_request());
    request.weather = Some("storm".to_string());

    let report = service.review(&request).await;

    assert_eq!(
        weather.calls(),
        vec![(
            12.9716,
            77.5946,
            NaiveDate::from_ymd_opt(2025, 2, 20).expect("valid date")
        )]
    );
    assert_eq!(report.weather_used, WeatherSeverity::None);
    assert_eq!(report.weather_source, WeatherSource::Automatic);
    assert_eq!(
        report.weather_evidence.as_deref(),
        Some("stub archive saw 0.2 mm/h")
    );
    // 50 - 15 + 25 + 10 + 10
    assert_eq!(report.evaluation.reliability_score, 80);
}

#[tokio::test]
async fn failed_lookup_falls_back_to_manual_severity() {
    let (service, weather, _) = build_service(StubWeather::offline(), None);
    let mut request = with_location(review_request());
    request.weather = Some("heavy".to_string());
    request.yes_ratio = Some("10".to_string());
    request.hours_before = Some("30".to_string());
    request.org_rate = Some("30".to_string());

    let report = service.review(&request).await;

    assert_eq!(weather.calls().len(), 1);
    assert_eq!(report.weather_used, WeatherSeverity::Heavy);
    assert_eq!(report.weather_source, WeatherSource::Manual);
    assert_eq!(report.weather_evidence.as_deref(), Some(WEATHER_UNAVAILABLE));
    // 50 + 20 - 15 - 5 - 20
    assert_eq!(report.evaluation.reliability_score, 30);
    assert_eq!(
        report.evaluation.decision,
        CancellationDecision::PotentiallyFraud
    );
}

#[tokio::test]
async fn invalid_coordinates_skip_the_lookup() {
    let (service, weather, _) =
        build_service(StubWeather::reporting(WeatherSeverity::Storm, 25.0), None);
    let mut request = with_location(review_request());
    request.lat = Some("north".to_string());

    let report = service.review(&request).await;

    assert!(weather.calls().is_empty());
    assert_eq!(report.weather_used, WeatherSeverity::Light);
    assert_eq!(
        report.weather_evidence.as_deref(),
        Some(WEATHER_LOOKUP_SKIPPED)
    );
}

#[tokio::test]
async fn partial_location_does_not_trigger_lookup() {
    let (service, weather, _) =
        build_service(StubWeather::reporting(WeatherSeverity::Storm, 25.0), None);
    let mut request = with_location(review_request());
    request.lon = None;

    let report = service.review(&request).await;

    assert!(weather.calls().is_empty());
    assert!(report.weather_evidence.is_none());
}

#[tokio::test]
async fn summary_prompt_carries_the_evaluation() {
    let (service, _, summarizer) = build_service(
        StubWeather::reporting(WeatherSeverity::Heavy, 9.3),
        Some(StubSummarizer::replying("The claim appears genuine.")),
    );

    let report = service.review(&with_location(review_request())).await;

    assert_eq!(report.ai_summary, "The claim appears genuine.");
    let prompts = summarizer.expect("summarizer configured").prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Claim reason: Heavy rain flooded the venue"));
    assert!(prompts[0].contains("Weather severity used: heavy"));
    assert!(prompts[0].contains("Weather evidence: stub archive saw 9.3 mm/h"));
    assert!(prompts[0].contains(&format!(
        "Score: {}",
        report.evaluation.reliability_score
    )));
    assert!(prompts[0].contains("Decision: LIKELY_GENUINE"));
}

#[tokio::test]
async fn summary_failure_degrades_to_fixed_message() {
    let (service, _, _) = build_service(StubWeather::offline(), Some(StubSummarizer::failing()));

    let report = service.review(&review_request()).await;

    assert_eq!(report.ai_summary, SUMMARY_UNAVAILABLE);
    assert_eq!(
        report.evaluation.decision,
        CancellationDecision::LikelyGenuine
    );
}
