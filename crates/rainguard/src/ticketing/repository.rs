use super::domain::{Event, EventId, Ticket};

/// Storage abstraction so the ticketing service can be exercised in isolation.
pub trait EventRepository: Send + Sync {
    /// Fails with `Conflict` when the id or slug is already taken.
    fn insert_event(&self, event: Event) -> Result<Event, RepositoryError>;
    /// Newest first.
    fn list_events(&self) -> Result<Vec<Event>, RepositoryError>;
    fn find_event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError>;
    fn insert_ticket(&self, ticket: Ticket) -> Result<Ticket, RepositoryError>;
    fn tickets_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
