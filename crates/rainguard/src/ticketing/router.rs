use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{NewEvent, NewTicket};
use super::repository::EventRepository;
use super::service::TicketingService;
use crate::error::AppError;

/// Router builder exposing organizer and attendee endpoints.
pub fn ticketing_router<R>(service: Arc<TicketingService<R>>) -> Router
where
    R: EventRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/events",
            post(create_event_handler::<R>).get(list_events_handler::<R>),
        )
        .route("/api/v1/events/:slug", get(event_handler::<R>))
        .route("/api/v1/events/:slug/tickets", post(book_ticket_handler::<R>))
        .with_state(service)
}

pub(crate) async fn create_event_handler<R>(
    State(service): State<Arc<TicketingService<R>>>,
    Json(entry): Json<NewEvent>,
) -> Result<Response, AppError>
where
    R: EventRepository + 'static,
{
    let event = service.create_event(entry)?;
    Ok((StatusCode::CREATED, Json(event)).into_response())
}

pub(crate) async fn list_events_handler<R>(
    State(service): State<Arc<TicketingService<R>>>,
) -> Result<Response, AppError>
where
    R: EventRepository + 'static,
{
    let events = service.list_events()?;
    Ok((StatusCode::OK, Json(events)).into_response())
}

pub(crate) async fn event_handler<R>(
    State(service): State<Arc<TicketingService<R>>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError>
where
    R: EventRepository + 'static,
{
    let view = service.event_by_slug(&slug)?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn book_ticket_handler<R>(
    State(service): State<Arc<TicketingService<R>>>,
    Path(slug): Path<String>,
    Json(entry): Json<NewTicket>,
) -> Result<Response, AppError>
where
    R: EventRepository + 'static,
{
    let confirmation = service.book_ticket(&slug, entry)?;
    Ok((StatusCode::CREATED, Json(confirmation)).into_response())
}
