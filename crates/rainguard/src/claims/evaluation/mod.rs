mod policy;
mod rules;

pub use policy::CancellationDecision;

use super::domain::CancellationInput;
use serde::{Deserialize, Serialize};

const BASELINE_SCORE: i32 = 50;
const MIN_SCORE: i32 = 0;
const MAX_SCORE: i32 = 100;

/// Scoring factor that produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationFactor {
    Weather,
    ParticipantConfirmation,
    Timing,
    OrganizerHistory,
}

/// Discrete contribution to an evaluation, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: CancellationFactor,
    pub adjustment: i32,
    pub note: String,
}

/// Score, decision and the notes explaining how they were reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationEvaluation {
    pub reliability_score: u8,
    pub decision: CancellationDecision,
    pub factor_notes: Vec<String>,
    pub components: Vec<FactorContribution>,
}

/// Score a cancellation claim.
///
/// Starts from a neutral 50 and applies weather, participant confirmation,
/// timing and organizer history in that order. Weather and participation
/// always contribute; timing and history only outside their neutral bands.
/// The running total is clamped to `0..=100` before the decision is taken.
pub fn evaluate(input: &CancellationInput) -> CancellationEvaluation {
    let components: Vec<FactorContribution> = [
        Some(rules::weather(input.weather_severity)),
        Some(rules::participation(input.participant_yes_ratio)),
        rules::timing(input.hours_before_event),
        rules::organizer_history(input.organizer_cancellation_rate),
    ]
    .into_iter()
    .flatten()
    .collect();

    let raw_score = components
        .iter()
        .fold(BASELINE_SCORE, |score, component| score + component.adjustment);
    let reliability_score = raw_score.clamp(MIN_SCORE, MAX_SCORE) as u8;

    CancellationEvaluation {
        reliability_score,
        decision: CancellationDecision::from_score(reliability_score),
        factor_notes: components
            .iter()
            .map(|component| component.note.clone())
            .collect(),
        components,
    }
}
