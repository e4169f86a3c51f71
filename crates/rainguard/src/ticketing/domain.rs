use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub Uuid);

/// Bookable event with an optional rain protection add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Date and time as entered by the organizer.
    pub date: String,
    pub location: String,
    pub ticket_price: u32,
    pub insurance_price: u32,
}

impl Event {
    pub fn quote(&self) -> PriceQuote {
        PriceQuote {
            ticket_only: self.ticket_price,
            with_cover: self.ticket_price.saturating_add(self.insurance_price),
        }
    }
}

/// Organizer input for a new event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub ticket_price: u32,
    #[serde(default)]
    pub insurance_price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub event_id: EventId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub has_insurance: bool,
    pub created_at: DateTime<Utc>,
}

/// Attendee input for a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub has_insurance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub ticket_only: u32,
    pub with_cover: u32,
}

/// Public event page: the event and what a ticket costs with and without cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub quote: PriceQuote,
}

/// Organizer dashboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub bookings: usize,
    pub insured: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub ticket: Ticket,
    pub event_slug: String,
    pub amount_due: u32,
}
