//! Historical rainfall lookup against the Open-Meteo archive.
//!
//! The lookup fails soft: transport errors, non-success responses and bodies
//! missing the hourly series are logged and reported as "no data" so callers
//! can fall back to a manually chosen severity.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::domain::{WeatherInference, WeatherSeverity};
use crate::config::WeatherConfig;

const STORM_MM_PER_HOUR: f64 = 20.0;
const HEAVY_MM_PER_HOUR: f64 = 7.0;
const LIGHT_MM_PER_HOUR: f64 = 1.0;

/// Capability used by the claim review pipeline to cross-check the weather.
#[async_trait]
pub trait WeatherClassifier: Send + Sync {
    async fn classify(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Option<WeatherInference>;
}

/// Map peak hourly rainfall (mm/h) to a severity tier. Lower bounds are inclusive.
pub fn classify_rainfall(max_rain_mm: f64) -> WeatherSeverity {
    if max_rain_mm >= STORM_MM_PER_HOUR {
        WeatherSeverity::Storm
    } else if max_rain_mm >= HEAVY_MM_PER_HOUR {
        WeatherSeverity::Heavy
    } else if max_rain_mm >= LIGHT_MM_PER_HOUR {
        WeatherSeverity::Light
    } else {
        WeatherSeverity::None
    }
}

fn explanation(severity: WeatherSeverity, max_rain_mm: f64, peak_time: Option<&str>) -> String {
    let when = match peak_time {
        Some(time) if !time.is_empty() => format!("around {time}"),
        _ => "during the day".to_string(),
    };

    match severity {
        WeatherSeverity::Storm => format!(
            "Open-Meteo reports very heavy rain (~{max_rain_mm:.1} mm/h) {when}, consistent with a storm-level disruption."
        ),
        WeatherSeverity::Heavy => format!(
            "Open-Meteo reports heavy rain (~{max_rain_mm:.1} mm/h) {when}, which strongly supports a genuine weather cancellation."
        ),
        WeatherSeverity::Light => format!(
            "Open-Meteo reports light rain (~{max_rain_mm:.1} mm/h) {when}. This is a weak-to-moderate justification for cancellation."
        ),
        WeatherSeverity::None => "Open-Meteo reports almost no rain on this date – weather alone does not justify cancellation.".to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default)]
    hourly: Option<ArchiveHourly>,
}

#[derive(Debug, Deserialize)]
struct ArchiveHourly {
    #[serde(default)]
    time: Option<Vec<String>>,
    #[serde(default)]
    rain: Option<Vec<Option<f64>>>,
}

/// Classify an archive response body. Returns `None` when the hourly series is missing.
pub fn infer_from_archive(response: &ArchiveResponse) -> Option<WeatherInference> {
    let hourly = response.hourly.as_ref()?;
    let times = hourly.time.as_ref()?;
    let rain = hourly.rain.as_ref()?;

    if rain.is_empty() {
        return Some(WeatherInference {
            severity: WeatherSeverity::None,
            max_rain_mm: 0.0,
            peak_time: None,
            explanation: "No rain data reported for the selected date.".to_string(),
        });
    }

    let mut max_rain = 0.0_f64;
    let mut max_index = 0;
    for (index, value) in rain.iter().enumerate() {
        let value = value.unwrap_or(0.0);
        if value > max_rain {
            max_rain = value;
            max_index = index;
        }
    }

    let peak_time = if max_rain > 0.0 {
        times.get(max_index).cloned()
    } else {
        None
    };
    let severity = classify_rainfall(max_rain);
    Some(WeatherInference {
        severity,
        max_rain_mm: max_rain,
        explanation: explanation(severity, max_rain, peak_time.as_deref()),
        peak_time,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherLookupError {
    #[error("weather archive request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("weather archive returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("weather archive response is missing the hourly rain series")]
    MissingHourlySeries,
}

/// Open-Meteo archive adapter.
#[derive(Clone)]
pub struct OpenMeteoClassifier {
    client: Client,
    base_url: String,
}

impl OpenMeteoClassifier {
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<WeatherInference, WeatherLookupError> {
        let day = date.format("%Y-%m-%d").to_string();
        let url = format!("{}/v1/archive", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
                ("hourly", "rain,precipitation,weathercode".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherLookupError::Status { status, body });
        }

        let archive: ArchiveResponse = response.json().await?;
        infer_from_archive(&archive).ok_or(WeatherLookupError::MissingHourlySeries)
    }
}

#[async_trait]
impl WeatherClassifier for OpenMeteoClassifier {
    async fn classify(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Option<WeatherInference> {
        match self.fetch(latitude, longitude, date).await {
            Ok(inference) => {
                debug!(
                    severity = %inference.severity,
                    max_rain_mm = inference.max_rain_mm,
                    %date,
                    "weather archive classified"
                );
                Some(inference)
            }
            Err(err) => {
                warn!(error = %err, latitude, longitude, %date, "weather lookup unavailable");
                None
            }
        }
    }
}
