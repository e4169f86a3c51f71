use super::super::domain::WeatherSeverity;
use super::{CancellationFactor, FactorContribution};

fn contribution(factor: CancellationFactor, adjustment: i32, note: &str) -> FactorContribution {
    FactorContribution {
        factor,
        adjustment,
        note: note.to_string(),
    }
}

pub(crate) fn weather(severity: WeatherSeverity) -> FactorContribution {
    let (adjustment, note) = match severity {
        WeatherSeverity::Storm => (
            30,
            "Storm / severe weather – strong signal of genuine cancellation.",
        ),
        WeatherSeverity::Heavy => (
            20,
            "Heavy rain reported – supports genuine weather cancellation.",
        ),
        WeatherSeverity::Light => (5, "Light rain – weak support for cancellation."),
        WeatherSeverity::None => (
            -15,
            "No bad weather reported – weather does NOT justify cancellation.",
        ),
    };
    contribution(CancellationFactor::Weather, adjustment, note)
}

pub(crate) fn participation(yes_ratio: f64) -> FactorContribution {
    let (adjustment, note) = if yes_ratio >= 0.7 {
        (25, "Most participants confirmed the event was cancelled.")
    } else if yes_ratio >= 0.4 {
        (10, "Many participants confirmed cancellation.")
    } else if yes_ratio >= 0.2 {
        (
            -5,
            "Low participant confirmation – cancellation is questionable.",
        )
    } else {
        (-15, "Very few participants confirmed cancellation.")
    };
    contribution(CancellationFactor::ParticipantConfirmation, adjustment, note)
}

/// `(2, 24]` hours before the event is neutral, as is an unknown (NaN) lead time.
pub(crate) fn timing(hours_before_event: f64) -> Option<FactorContribution> {
    if hours_before_event.is_nan() {
        None
    } else if hours_before_event <= 2.0 {
        Some(contribution(
            CancellationFactor::Timing,
            10,
            "Cancellation close to event time – typical for last-minute issues.",
        ))
    } else if hours_before_event > 24.0 {
        Some(contribution(
            CancellationFactor::Timing,
            -5,
            "Cancellation far in advance – may indicate demand / business reasons.",
        ))
    } else {
        None
    }
}

/// A rate strictly between 5% and 25% is neutral.
pub(crate) fn organizer_history(cancellation_rate: f64) -> Option<FactorContribution> {
    if cancellation_rate <= 0.05 {
        Some(contribution(
            CancellationFactor::OrganizerHistory,
            10,
            "Organizer almost never cancels – good track record.",
        ))
    } else if cancellation_rate >= 0.25 {
        Some(contribution(
            CancellationFactor::OrganizerHistory,
            -20,
            "Organizer cancels frequently – higher fraud risk.",
        ))
    } else {
        None
    }
}
