//! Cancellation claim review: the rule engine plus its optional weather
//! cross-check and analyst summary.

pub mod domain;
pub mod evaluation;
pub mod router;
pub mod service;
pub mod summary;
pub mod weather;

#[cfg(test)]
mod tests;

pub use domain::{CancellationInput, WeatherInference, WeatherSeverity, WeatherSource};
pub use evaluation::{
    evaluate, CancellationDecision, CancellationEvaluation, CancellationFactor,
    FactorContribution,
};
pub use router::claims_router;
pub use service::{ClaimReviewReport, ClaimReviewRequest, ClaimReviewService};
pub use summary::{OpenAiSummarizer, SummaryError, Summarizer};
pub use weather::{classify_rainfall, OpenMeteoClassifier, WeatherClassifier, WeatherLookupError};
