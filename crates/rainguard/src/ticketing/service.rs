use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use super::domain::{
    BookingConfirmation, Event, EventId, EventSummary, EventView, NewEvent, NewTicket, Ticket,
    TicketId,
};
use super::repository::{EventRepository, RepositoryError};

const SLUG_ATTEMPTS: usize = 5;
const SLUG_SUFFIX_RANGE: u32 = 10_000;

/// Lowercase the name and collapse anything outside `[a-z0-9]` into single dashes.
pub fn slug_base(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn generate_slug(name: &str) -> String {
    let suffix = rand::thread_rng().gen_range(0..SLUG_SUFFIX_RANGE);
    let base = slug_base(name);
    if base.is_empty() {
        suffix.to_string()
    } else {
        format!("{base}-{suffix}")
    }
}

fn required(value: &str, field: &'static str) -> Result<String, TicketingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TicketingError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Service composing slug generation, pricing and the event repository.
pub struct TicketingService<R> {
    repository: Arc<R>,
}

impl<R> TicketingService<R>
where
    R: EventRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create an event, retrying slug generation when a slug is already taken.
    pub fn create_event(&self, entry: NewEvent) -> Result<Event, TicketingError> {
        let name = required(&entry.name, "name")?;
        let date = required(&entry.date, "date")?;
        let location = required(&entry.location, "location")?;
        let id = EventId(Uuid::new_v4());

        let mut attempt = 0;
        loop {
            attempt += 1;
            let event = Event {
                id,
                slug: generate_slug(&name),
                name: name.clone(),
                description: entry.description.trim().to_string(),
                date: date.clone(),
                location: location.clone(),
                ticket_price: entry.ticket_price,
                insurance_price: entry.insurance_price,
            };

            match self.repository.insert_event(event) {
                Ok(stored) => {
                    info!(event_id = %stored.id.0, slug = %stored.slug, "event created");
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict) if attempt < SLUG_ATTEMPTS => {
                    warn!(attempt, "event slug already taken, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Events newest first, with booking and rain protection counts.
    pub fn list_events(&self) -> Result<Vec<EventSummary>, TicketingError> {
        self.repository
            .list_events()?
            .into_iter()
            .map(|event| -> Result<EventSummary, TicketingError> {
                let tickets = self.repository.tickets_for_event(&event.id)?;
                let insured = tickets.iter().filter(|ticket| ticket.has_insurance).count();
                Ok(EventSummary {
                    event,
                    bookings: tickets.len(),
                    insured,
                })
            })
            .collect()
    }

    pub fn event_by_slug(&self, slug: &str) -> Result<EventView, TicketingError> {
        let event = self.find(slug)?;
        let quote = event.quote();
        Ok(EventView { event, quote })
    }

    /// Book a ticket; the amount due includes cover only when it was requested.
    pub fn book_ticket(
        &self,
        slug: &str,
        entry: NewTicket,
    ) -> Result<BookingConfirmation, TicketingError> {
        let event = self.find(slug)?;
        let ticket = Ticket {
            id: TicketId(Uuid::new_v4()),
            event_id: event.id,
            name: required(&entry.name, "name")?,
            email: required(&entry.email, "email")?,
            phone: entry.phone.trim().to_string(),
            has_insurance: entry.has_insurance,
            created_at: Utc::now(),
        };

        let ticket = self.repository.insert_ticket(ticket)?;
        let quote = event.quote();
        let amount_due = if ticket.has_insurance {
            quote.with_cover
        } else {
            quote.ticket_only
        };

        info!(
            event_id = %event.id.0,
            ticket_id = %ticket.id.0,
            has_insurance = ticket.has_insurance,
            amount_due,
            "ticket booked"
        );

        Ok(BookingConfirmation {
            ticket,
            event_slug: event.slug,
            amount_due,
        })
    }

    fn find(&self, slug: &str) -> Result<Event, TicketingError> {
        self.repository
            .find_event_by_slug(slug)?
            .ok_or_else(|| TicketingError::EventNotFound(slug.to_string()))
    }
}

/// Error raised by the ticketing service.
#[derive(Debug, thiserror::Error)]
pub enum TicketingError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("event '{0}' not found")]
    EventNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
