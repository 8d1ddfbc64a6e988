//! Event commands: listing, detail, authoring, registration and watch.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app_state::AppState;
use crate::cli::output::{OutputFormat, alert, alert_with, print_field, print_table_header, print_table_row};
use crate::domain::{Event, EventId, StoreEvent};
use crate::error::{ClientError, LOGIN_REQUIRED_MESSAGE};
use crate::presentation::{calculate_slots, fill_percentage, format_time_range, progress_bar};
use crate::service::event_service::{CREATE_FAILED_MESSAGE, CREATE_REJECTED_MESSAGE};
use crate::service::registration::REGISTER_FAILED_MESSAGE;
use crate::service::{NewEvent, RegistrationState};
use crate::view::ViewScope;

/// `matchday events ...`
#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List all events
    List,

    /// Show one event with participants and price
    Show {
        /// Event ID
        id: EventId,
    },

    /// Create an event
    Create {
        /// Event name
        #[arg(long, short)]
        name: String,

        /// Category ID
        #[arg(long, short)]
        category: i64,

        /// Start time (RFC 3339, e.g. 2025-05-15T19:00:00Z)
        #[arg(long)]
        start: DateTime<Utc>,

        /// End time (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,

        /// Location
        #[arg(long, short)]
        location: String,

        /// Number of people
        #[arg(long, short = 'p')]
        capacity: i64,

        /// Description
        #[arg(long, short, default_value = "")]
        description: String,

        /// Cover image URL
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Delete an event
    Delete {
        /// Event ID
        id: EventId,
    },

    /// List events created by the signed-in user
    Mine,

    /// Register the signed-in user for an event
    Join {
        /// Event ID
        id: EventId,
    },

    /// Show whether the signed-in user is registered for an event
    Status {
        /// Event ID
        id: EventId,
    },

    /// Keep the event list fresh and print changes until Ctrl-C
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value = "30")]
        interval: u64,
    },
}

/// Runs an event command.
///
/// # Errors
///
/// Returns the alert text of the failed action.
pub async fn run(command: EventsCommand, state: &AppState, output: OutputFormat) -> Result<()> {
    match command {
        EventsCommand::List => list(state, output).await,
        EventsCommand::Show { id } => show(state, output, id).await,
        EventsCommand::Create {
            name,
            category,
            start,
            end,
            location,
            capacity,
            description,
            image_url,
        } => {
            let form = NewEvent {
                category_id: category,
                event_name: name,
                event_start_time: start,
                event_end_time: end,
                location,
                number_people: capacity,
                description,
                image_url,
            };
            create(state, output, form).await
        }
        EventsCommand::Delete { id } => delete(state, id).await,
        EventsCommand::Mine => mine(state, output).await,
        EventsCommand::Join { id } => join(state, output, id).await,
        EventsCommand::Status { id } => status(state, output, id).await,
        EventsCommand::Watch { interval } => watch(state, Duration::from_secs(interval.max(1))).await,
    }
}

fn print_events(events: &[Event]) {
    print_table_header(&[
        ("ID", 6),
        ("NAME", 28),
        ("CATEGORY", 12),
        ("DATE", 10),
        ("TIME", 13),
        ("CAP", 4),
        ("LOCATION", 24),
    ]);
    for event in events {
        let date = event.event_start_time.format("%Y-%m-%d").to_string();
        print_table_row(&[
            (&event.id.to_string(), 6),
            (&event.event_name, 28),
            (event.category_name(), 12),
            (&date, 10),
            (
                &format_time_range(event.event_start_time, event.event_end_time),
                13,
            ),
            (&event.number_people.to_string(), 4),
            (&event.location, 24),
        ]);
    }
}

async fn list(state: &AppState, output: OutputFormat) -> Result<()> {
    let scope = ViewScope::new();
    if !state.events.fetch_events_in(&scope).await && state.store.is_empty() {
        anyhow::bail!("Failed to load events");
    }
    let events = state.store.events();

    if output.is_text() {
        if events.is_empty() {
            println!("No events found");
            return Ok(());
        }
        print_events(&events);
    } else {
        output.print_value(&events)?;
    }
    Ok(())
}

async fn show(state: &AppState, output: OutputFormat, id: EventId) -> Result<()> {
    let scope = ViewScope::new();
    let detail = state
        .events
        .event_detail(id, &scope)
        .await
        .map_err(alert("Failed to load event details"))?;

    if !output.is_text() {
        return output.print_value(&detail);
    }

    let event = &detail.event;
    print_field("ID", &event.id.to_string());
    print_field("Name", &event.event_name);
    print_field("Category", event.category_name());
    print_field("Date", &event.event_start_time.format("%A, %d %B %Y").to_string());
    print_field(
        "Time",
        &format_time_range(event.event_start_time, event.event_end_time),
    );
    print_field("Location", &event.location);
    print_field("Organizer", &event.username);
    if !event.description.is_empty() {
        print_field("Description", &event.description);
    }
    print_field("Image", event.display_image_url());
    if let Some(price) = &detail.price {
        print_field("Price", &format!("{:.0}", price.amount()));
    }
    match detail.people() {
        Some(people) => {
            let slots = calculate_slots(&people);
            print_field(
                "People",
                format!("{people} {slots}").trim_end(),
            );
            print_field("Filled", &progress_bar(fill_percentage(&people), 20));
        }
        None => print_field("Capacity", &event.number_people.to_string()),
    }
    if let Some(registered) = detail.registered {
        print_field("Registered", if registered { "yes" } else { "no" });
    }
    Ok(())
}

async fn create(state: &AppState, output: OutputFormat, form: NewEvent) -> Result<()> {
    let event = state
        .events
        .create_event(form)
        .await
        .map_err(alert_with(CREATE_FAILED_MESSAGE, CREATE_REJECTED_MESSAGE))?;

    if output.is_text() {
        println!("Created event: {} ({})", event.event_name, event.id);
        for notification in state.store.notifications() {
            println!("{}", notification.message);
        }
    } else {
        output.print_value(&event)?;
    }
    Ok(())
}

async fn delete(state: &AppState, id: EventId) -> Result<()> {
    state
        .events
        .delete_event(id)
        .await
        .map_err(alert("Failed to delete event"))?;
    println!("Deleted event {id}");
    Ok(())
}

async fn mine(state: &AppState, output: OutputFormat) -> Result<()> {
    let scope = ViewScope::new();
    let events = state
        .events
        .history(&scope)
        .await
        .map_err(alert("Failed to load your events"))?;

    if output.is_text() {
        if events.is_empty() {
            println!("You have not created any events yet");
            return Ok(());
        }
        print_events(&events);
    } else {
        output.print_value(&events)?;
    }
    Ok(())
}

async fn join(state: &AppState, output: OutputFormat, id: EventId) -> Result<()> {
    let flow = state.registration(id);

    match flow.check_registration_status().await {
        Ok(true) => {
            println!("You are already registered for event {id}");
            return Ok(());
        }
        Ok(false) => {}
        Err(e @ ClientError::NotLoggedIn) => return Err(alert(LOGIN_REQUIRED_MESSAGE)(e)),
        // Registration can still be attempted when the check failed.
        Err(e) => tracing::warn!(event_id = %id, error = %e, "registration check failed"),
    }

    flow.register()
        .await
        .map_err(alert(REGISTER_FAILED_MESSAGE))?;

    if output.is_text() {
        println!("Successfully registered for event {id}!");
    } else {
        output.print_value(&flow.state())?;
    }
    Ok(())
}

async fn status(state: &AppState, output: OutputFormat, id: EventId) -> Result<()> {
    let flow = state.registration(id);
    flow.check_registration_status()
        .await
        .map_err(alert("Failed to check registration status"))?;

    if output.is_text() {
        let text = match flow.state() {
            RegistrationState::Registered => "registered".to_string(),
            RegistrationState::NotRegistered => "not registered".to_string(),
            other => format!("{other:?}"),
        };
        println!("Event {id}: {text}");
    } else {
        output.print_value(&flow.state())?;
    }
    Ok(())
}

async fn watch(state: &AppState, interval: Duration) -> Result<()> {
    println!("Watching events every {}s (Ctrl-C to stop)", interval.as_secs());
    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    watch_until(state, interval, stop).await;
    Ok(())
}

/// Refreshes the event list every `interval` and prints each store
/// change until `stop` resolves.
///
/// Each refresh runs in a child of the watch scope, so `stop` also
/// cancels a refresh that is still waiting on the backend.
pub async fn watch_until(state: &AppState, interval: Duration, stop: impl Future<Output = ()>) {
    let scope = ViewScope::new();
    let mut changes = state.store.event_bus().subscribe();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut refresh: Option<(ViewScope, JoinHandle<Result<bool, ClientError>>)> = None;
    tokio::pin!(stop);

    loop {
        tokio::select! {
            () = &mut stop => break,
            _ = ticker.tick(), if refresh.is_none() => {
                let child = scope.child();
                let events = Arc::clone(&state.events);
                let handle = child.spawn(async move { Ok(events.fetch_events().await) });
                refresh = Some((child, handle));
            }
            finished = async {
                match refresh.as_mut() {
                    Some((_, handle)) => handle.await,
                    None => std::future::pending().await,
                }
            }, if refresh.is_some() => {
                refresh = None;
                if !matches!(finished, Ok(Ok(true))) {
                    tracing::debug!("watch refresh kept the previous list");
                }
            }
            change = changes.recv() => {
                match change {
                    Ok(change) => print_change(state, &change),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "watch lagged behind store changes");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
    scope.cancel();
}

fn print_change(state: &AppState, change: &StoreEvent) {
    let at = change.timestamp().format("%H:%M:%S");
    match change {
        StoreEvent::EventsReplaced { count, .. } => {
            println!("[{at}] {count} events");
        }
        StoreEvent::EventAdded { event_id, .. } => {
            let name = state
                .store
                .find(*event_id)
                .map_or_else(|| event_id.to_string(), |e| e.event_name);
            println!("[{at}] added {name}");
        }
        StoreEvent::EventRemoved { event_id, .. } => {
            println!("[{at}] removed event {event_id}");
        }
        StoreEvent::NotificationAdded { notification, .. } => {
            println!("[{at}] {}", notification.message);
        }
    }
}
