//! Garden booking demo.
//!
//! Walks one scripted booking through a `Store`: gardening with the
//! 4-visit plan, tomorrow at the first slot. Prints the review summary and
//! the record handed to the submitter as JSON.

use anyhow::Context;
use chrono::Days;
use garden_booking::{
    BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState, FieldUpdate,
    LoggingSubmitter, PlanId, ServiceType, SubmissionStatus, TimeSlot,
};
use garden_booking_core::environment::{Clock, SystemClock};
use garden_booking_runtime::Store;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,garden_booking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BookingConfig::from_env().context("loading booking configuration")?;
    info!(?config, "Configuration loaded");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let environment = BookingEnvironment::new(
        Arc::clone(&clock),
        Arc::new(LoggingSubmitter::new(Arc::clone(&clock))),
    )
    .with_policy(config.policy()?);

    let store = Store::new(BookingState::new(), BookingReducer::new(), environment);

    let tomorrow = clock
        .today()
        .checked_add_days(Days::new(1))
        .context("date overflow")?;
    let first_slot = TimeSlot::at_hour(config.opening_hour).context("opening hour out of range")?;

    let script = [
        BookingAction::UpdateField(FieldUpdate::ServiceType(Some(ServiceType::Gardening))),
        BookingAction::UpdateField(FieldUpdate::ServicePlan(Some(PlanId::FourVisits))),
        BookingAction::Next,
        BookingAction::UpdateField(FieldUpdate::Date(Some(tomorrow))),
        BookingAction::UpdateField(FieldUpdate::TimeSlot(Some(first_slot))),
        BookingAction::Next,
        BookingAction::UpdateField(FieldUpdate::Name("Ada Gardener".to_string())),
        BookingAction::UpdateField(FieldUpdate::Email("ada@example.com".to_string())),
        BookingAction::UpdateField(FieldUpdate::Phone("555-0100".to_string())),
        BookingAction::UpdateField(FieldUpdate::Address("12 Orchard Lane".to_string())),
        BookingAction::UpdateField(FieldUpdate::Notes("Side gate is unlocked".to_string())),
        BookingAction::Next,
    ];
    for action in script {
        store.send(action).await?;
    }

    let (step, errors, summary) = store
        .state(|s| (s.step(), s.errors().clone(), s.summary().cloned()))
        .await;
    if !errors.is_empty() {
        anyhow::bail!("booking stopped at {step}: {}", serde_json::to_string(&errors)?);
    }
    let summary = summary.context("review reached without a summary")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!("{}", serde_json::to_string_pretty(&summary.submission())?);

    let mut handle = store.send(BookingAction::Submit).await?;
    handle.wait_with_timeout(config.submit_timeout()).await?;

    match store.state(|s| s.submission().clone()).await {
        SubmissionStatus::Confirmed(receipt) => {
            info!(confirmation_id = %receipt.confirmation_id, "Booking confirmed");
        },
        other => anyhow::bail!("booking was not confirmed: {other:?}"),
    }

    store.shutdown(config.submit_timeout()).await?;
    Ok(())
}
