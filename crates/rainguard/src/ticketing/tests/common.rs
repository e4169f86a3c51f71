use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::ticketing::domain::{Event, EventId, NewEvent, NewTicket, Ticket};
use crate::ticketing::repository::{EventRepository, RepositoryError};
use crate::ticketing::service::TicketingService;

pub(super) fn new_event(name: &str) -> NewEvent {
    NewEvent {
        name: name.to_string(),
        description: "Open-air evening concert".to_string(),
        date: "2025-02-20T18:30".to_string(),
        location: "Cubbon Park, Bengaluru".to_string(),
        ticket_price: 499,
        insurance_price: 49,
    }
}

pub(super) fn new_ticket(has_insurance: bool) -> NewTicket {
    NewTicket {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "+91 98450 00000".to_string(),
        has_insurance,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    pub(super) events: Arc<Mutex<Vec<Event>>>,
    pub(super) tickets: Arc<Mutex<Vec<Ticket>>>,
}

impl EventRepository for MemoryEvents {
    fn insert_event(&self, event: Event) -> Result<Event, RepositoryError> {
        let mut guard = self.events.lock().expect("event mutex poisoned");
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
        let guard = self.events.lock().expect("event mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError> {
        let guard = self.events.lock().expect("event mutex poisoned");
        Ok(guard.iter().find(|event| event.slug == slug).cloned())
    }

    fn insert_ticket(&self, ticket: Ticket) -> Result<Ticket, RepositoryError> {
        self.tickets
            .lock()
            .expect("ticket mutex poisoned")
            .push(ticket.clone());
        Ok(ticket)
    }

    fn tickets_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, RepositoryError> {
        let guard = self.tickets.lock().expect("ticket mutex poisoned");
        Ok(guard
            .iter()
            .filter(|ticket| &ticket.event_id == event_id)
            .cloned()
            .collect())
    }
}

/// Rejects the first `conflicts` event inserts, then delegates to memory.
pub(super) struct FlakySlugRepository {
    pub(super) conflicts: usize,
    pub(super) attempts: AtomicUsize,
    pub(super) inner: MemoryEvents,
}

impl FlakySlugRepository {
    pub(super) fn new(conflicts: usize) -> Self {
        Self {
            conflicts,
            attempts: AtomicUsize::new(0),
            inner: MemoryEvents::default(),
        }
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl EventRepository for FlakySlugRepository {
    fn insert_event(&self, event: Event) -> Result<Event, RepositoryError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.conflicts {
            return Err(RepositoryError::Conflict);
        }
        self.inner.insert_event(event)
    }

    fn list_events(&self) -> Result<Vec<Event>, RepositoryError> {
        self.inner.list_events()
    }

    fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError> {
        self.inner.find_event_by_slug(slug)
    }

    fn insert_ticket(&self, ticket: Ticket) -> Result<Ticket, RepositoryError> {
        self.inner.insert_ticket(ticket)
    }

    fn tickets_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, RepositoryError> {
        self.inner.tickets_for_event(event_id)
    }
}

pub(super) struct UnavailableRepository;

impl EventRepository for UnavailableRepository {
    fn insert_event(&self, _event: Event) -> Result<Event, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_events(&self) -> Result<Vec<Event>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_event_by_slug(&self, _slug: &str) -> Result<Option<Event>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_ticket(&self, _ticket: Ticket) -> Result<Ticket, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn tickets_for_event(&self, _event_id: &EventId) -> Result<Vec<Ticket>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (TicketingService<MemoryEvents>, Arc<MemoryEvents>) {
    let repository = Arc::new(MemoryEvents::default());
    (TicketingService::new(repository.clone()), repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
