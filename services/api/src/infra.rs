use metrics_exporter_prometheus::PrometheusHandle;
use rainguard::claims::{ClaimReviewService, OpenAiSummarizer, OpenMeteoClassifier};
use rainguard::config::{SummaryConfig, WeatherConfig};
use rainguard::error::AppError;
use rainguard::ticketing::{Event, EventId, EventRepository, RepositoryError, Ticket};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LiveClaimReviewService = ClaimReviewService<OpenMeteoClassifier, OpenAiSummarizer>;

/// Build the claim pipeline from configuration; summaries stay off without an API key.
pub(crate) fn claim_review_service(
    weather: &WeatherConfig,
    summary: &SummaryConfig,
) -> Result<LiveClaimReviewService, AppError> {
    let classifier = OpenMeteoClassifier::new(weather)?;
    let summarizer = OpenAiSummarizer::from_config(summary)?;
    Ok(ClaimReviewService::new(
        Arc::new(classifier),
        summarizer.map(Arc::new),
    ))
}

/// Append-only event and ticket storage held in process memory.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEventStore {
    events: Arc<Mutex<Vec<Event>>>,
    tickets: Arc<Mutex<Vec<Ticket>>>,
}

impl EventRepository for InMemoryEventStore {
    fn insert_event(&self, event: Event) -> Result<Event, RepositoryError> {
        let mut guard = self.events.lock().expect("event store mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.id == event.id || existing.slug == event.slug)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(event.clone());
        Ok(event)
    }

    fn list_events(&self) -> Result<Vec<Event>, RepositoryError> {
        let guard = self.events.lock().expect("event store mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError> {
        let guard = self.events.lock().expect("event store mutex poisoned");
        Ok(guard.iter().find(|event| event.slug == slug).cloned())
    }

    fn insert_ticket(&self, ticket: Ticket) -> Result<Ticket, RepositoryError> {
        let events = self.events.lock().expect("event store mutex poisoned");
        if !events.iter().any(|event| event.id == ticket.event_id) {
            return Err(RepositoryError::NotFound);
        }
        drop(events);

        let mut guard = self.tickets.lock().expect("ticket store mutex poisoned");
        guard.push(ticket.clone());
        Ok(ticket)
    }

    fn tickets_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, RepositoryError> {
        let guard = self.tickets.lock().expect("ticket store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|ticket| &ticket.event_id == event_id)
            .cloned()
            .collect())
    }
}
