use serde::{Deserialize, Serialize};

const GENUINE_THRESHOLD: u8 = 70;
const FRAUD_THRESHOLD: u8 = 40;

/// Three-way verdict on a cancellation claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellationDecision {
    LikelyGenuine,
    Uncertain,
    PotentiallyFraud,
}

impl CancellationDecision {
    pub fn from_score(score: u8) -> Self {
        if score >= GENUINE_THRESHOLD {
            CancellationDecision::LikelyGenuine
        } else if score <= FRAUD_THRESHOLD {
            CancellationDecision::PotentiallyFraud
        } else {
            CancellationDecision::Uncertain
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CancellationDecision::LikelyGenuine => "LIKELY_GENUINE",
            CancellationDecision::Uncertain => "UNCERTAIN",
            CancellationDecision::PotentiallyFraud => "POTENTIALLY_FRAUD",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            CancellationDecision::LikelyGenuine => "claim looks genuine",
            CancellationDecision::Uncertain => "claim needs a closer look",
            CancellationDecision::PotentiallyFraud => "claim shows fraud indicators",
        }
    }
}
