use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::domain::WeatherSeverity;
use super::evaluation::CancellationEvaluation;
use crate::config::SummaryConfig;

pub const SUMMARY_NOT_CONFIGURED: &str = "AI not available";
pub const SUMMARY_UNAVAILABLE: &str =
    "AI summary unavailable (invalid key, quota, or network error).";

const SYSTEM_PROMPT: &str = "Insurance claims analyst assistant.";

/// Free-text summarization capability backing the optional analyst verdict.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String, SummaryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("summary request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("summary response contained no message content")]
    EmptyCompletion,
    #[error("summary provider rejected the request: {0}")]
    Rejected(String),
}

/// Everything the analyst prompt mentions about a reviewed claim.
pub struct SummaryContext<'a> {
    pub reason: &'a str,
    pub weather_used: WeatherSeverity,
    pub weather_evidence: Option<&'a str>,
    pub evaluation: &'a CancellationEvaluation,
}

pub fn build_prompt(context: &SummaryContext<'_>) -> String {
    format!(
        "Claim reason: {}\nWeather severity used: {}\nWeather evidence: {}\nScore: {}\nDecision: {}\nExplain in 3 sentences.",
        context.reason,
        context.weather_used,
        context.weather_evidence.unwrap_or("none"),
        context.evaluation.reliability_score,
        context.evaluation.decision.label(),
    )
}

/// OpenAI-compatible chat-completion adapter.
#[derive(Clone)]
pub struct OpenAiSummarizer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiSummarizer {
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_config(config: &SummaryConfig) -> Result<Option<Self>, reqwest::Error> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        }))
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummaryError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SummaryError::Rejected(format!("HTTP {status}: {detail}")));
        }

        let payload: Value = response.json().await?;
        completion_content(&payload)
    }
}

fn completion_content(payload: &Value) -> Result<String, SummaryError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .ok_or(SummaryError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::domain::CancellationInput;
    use crate::claims::evaluation::evaluate;

    #[test]
    fn prompt_lists_score_and_decision() {
        let evaluation = evaluate(&CancellationInput {
            reason: "Venue flooded".to_string(),
            weather_severity: WeatherSeverity::Storm,
            participant_yes_ratio: 0.8,
            hours_before_event: 1.0,
            organizer_cancellation_rate: 0.0,
        });

        let prompt = build_prompt(&SummaryContext {
            reason: "Venue flooded",
            weather_used: WeatherSeverity::Storm,
            weather_evidence: None,
            evaluation: &evaluation,
        });

        assert!(prompt.starts_with("Claim reason: Venue flooded\n"));
        assert!(prompt.contains("Weather severity used: storm"));
        assert!(prompt.contains("Weather evidence: none"));
        assert!(prompt.contains("Score: 100"));
        assert!(prompt.contains("Decision: LIKELY_GENUINE"));
        assert!(prompt.ends_with("Explain in 3 sentences."));
    }

    #[test]
    fn reads_first_choice_content() {
        let payload = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Looks genuine.  " } }]
        });
        assert_eq!(completion_content(&payload).unwrap(), "Looks genuine.");
    }

    #[test]
    fn blank_completion_is_an_error() {
        let payload = json!({ "choices": [{ "message": { "content": "" } }] });
        assert!(matches!(
            completion_content(&payload),
            Err(SummaryError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_content(&json!({})),
            Err(SummaryError::EmptyCompletion)
        ));
    }

    #[test]
    fn missing_key_disables_adapter() {
        assert!(OpenAiSummarizer::from_config(&SummaryConfig::default())
            .expect("client builds")
            .is_none());
    }
}
