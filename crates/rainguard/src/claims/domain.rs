use std::fmt;

use serde::{Deserialize, Serialize};

/// Discretized weather signal shared by the manual form input and the archive lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSeverity {
    #[default]
    None,
    Light,
    Heavy,
    Storm,
}

impl WeatherSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherSeverity::None => "none",
            WeatherSeverity::Light => "light",
            WeatherSeverity::Heavy => "heavy",
            WeatherSeverity::Storm => "storm",
        }
    }

    /// Lenient form parsing; anything unrecognized reads as dry weather.
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => WeatherSeverity::Light,
            "heavy" => WeatherSeverity::Heavy,
            "storm" => WeatherSeverity::Storm,
            _ => WeatherSeverity::None,
        }
    }
}

impl fmt::Display for WeatherSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signals gathered for a single cancellation claim.
///
/// Ratios are expected in `[0, 1]` and hours to be non-negative; the evaluator
/// takes them as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationInput {
    #[serde(default)]
    pub reason: String,
    pub weather_severity: WeatherSeverity,
    pub participant_yes_ratio: f64,
    pub hours_before_event: f64,
    pub organizer_cancellation_rate: f64,
}

/// Source of the severity that was fed to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    Automatic,
    Manual,
}

/// Result of classifying the archived rainfall for an event date and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInference {
    pub severity: WeatherSeverity,
    pub max_rain_mm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_time: Option<String>,
    pub explanation: String,
}
