use crate::infra::{claim_review_service, InMemoryEventStore};
use clap::Args;
use rainguard::claims::{ClaimReviewReport, ClaimReviewRequest};
use rainguard::config::{AppConfig, SummaryConfig, WeatherConfig};
use rainguard::error::AppError;
use rainguard::ticketing::{NewEvent, NewTicket, TicketingService};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReviewArgs {
    /// Organizer's stated reason for cancelling
    #[arg(long)]
    pub(crate) reason: Option<String>,
    /// Manual weather severity used as fallback (none, light, heavy, storm)
    #[arg(long)]
    pub(crate) weather: Option<String>,
    /// Participants confirming the cancellation, in percent
    #[arg(long)]
    pub(crate) yes_ratio: Option<String>,
    /// Hours before the event the cancellation was triggered
    #[arg(long)]
    pub(crate) hours_before: Option<String>,
    /// Organizer's past cancellation rate, in percent
    #[arg(long)]
    pub(crate) org_rate: Option<String>,
    /// Event date (YYYY-MM-DD) for the automatic weather check
    #[arg(long)]
    pub(crate) event_date: Option<String>,
    /// Event latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lat: Option<String>,
    /// Event longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lon: Option<String>,
}

impl From<ReviewArgs> for ClaimReviewRequest {
    fn from(args: ReviewArgs) -> Self {
        ClaimReviewRequest {
            reason: args.reason,
            weather: args.weather,
            yes_ratio: args.yes_ratio,
            hours_before: args.hours_before,
            org_rate: args.org_rate,
            event_date: args.event_date,
            lat: args.lat,
            lon: args.lon,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the claim review portion of the demo.
    #[arg(long)]
    pub(crate) skip_claim: bool,
}

pub(crate) async fn run_review(args: ReviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = claim_review_service(&config.weather, &config.summary)?;

    let request = ClaimReviewRequest::from(args);
    if !request.has_input() {
        println!("Nothing to review: pass at least one of --reason, --yes-ratio, --hours-before, --org-rate, --event-date, --lat, --lon");
        return Ok(());
    }

    let report = service.review(&request).await;
    render_report(&report);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Rain protection demo (in-memory storage)");
    let store = Arc::new(InMemoryEventStore::default());
    let ticketing = TicketingService::new(store);

    let event = ticketing.create_event(NewEvent {
        name: "Monsoon Music Night".to_string(),
        description: "Open-air evening concert".to_string(),
        date: "2025-07-12T19:00".to_string(),
        location: "Cubbon Park, Bengaluru".to_string(),
        ticket_price: 499,
        insurance_price: 49,
    })?;
    let quote = event.quote();
    println!(
        "- Created '{}' at {} | ticket {} | with rain cover {}",
        event.name,
        event_path(&event.slug),
        quote.ticket_only,
        quote.with_cover
    );

    for (name, insured) in [("Asha", true), ("Ravi", false), ("Meera", true)] {
        let confirmation = ticketing.book_ticket(
            &event.slug,
            NewTicket {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: String::new(),
                has_insurance: insured,
            },
        )?;
        println!(
            "  - Booked {} ({}) -> due {}",
            name,
            if insured { "protected" } else { "ticket only" },
            confirmation.amount_due
        );
    }

    for summary in ticketing.list_events()? {
        println!(
            "- Dashboard: {} | bookings {} | {} with protection",
            summary.event.name, summary.bookings, summary.insured
        );
    }

    if args.skip_claim {
        return Ok(());
    }

    println!("\nClaim review (weather lookup and AI summary disabled)");
    let claims = claim_review_service(&WeatherConfig::default(), &SummaryConfig::default())?;
    let report = claims
        .review(&ClaimReviewRequest {
            reason: Some("Heavy rain flooded the lawn an hour before doors".to_string()),
            weather: Some("heavy".to_string()),
            yes_ratio: Some("82".to_string()),
            hours_before: Some("1".to_string()),
            org_rate: Some("4".to_string()),
            ..ClaimReviewRequest::default()
        })
        .await;
    render_report(&report);

    Ok(())
}

fn event_path(slug: &str) -> String {
    format!("/api/v1/events/{slug}")
}

fn render_report(report: &ClaimReviewReport) {
    println!("Risk assessment");
    if !report.reason.is_empty() {
        println!("- Reason: {}", report.reason);
    }
    println!(
        "- Weather used: {} ({:?})",
        report.weather_used, report.weather_source
    );
    if let Some(evidence) = &report.weather_evidence {
        println!("- Weather evidence: {evidence}");
    }
    println!(
        "- Score: {} | Decision: {} ({})",
        report.evaluation.reliability_score,
        report.evaluation.decision.label(),
        report.evaluation.decision.summary()
    );
    println!("- Factors:");
    for note in &report.evaluation.factor_notes {
        println!("    - {note}");
    }
    println!("- AI summary: {}", report.ai_summary);
}
