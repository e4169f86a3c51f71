//! Event creation and ticket booking with the optional rain protection add-on.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BookingConfirmation, Event, EventId, EventSummary, EventView, NewEvent, NewTicket,
    PriceQuote, Ticket, TicketId,
};
pub use repository::{EventRepository, RepositoryError};
pub use router::ticketing_router;
pub use service::{slug_base, TicketingError, TicketingService};
