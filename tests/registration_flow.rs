//! Participant registration against the stub backend.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use common::{ACCOUNT_ID, PASSWORD, Stub, event_json, participant_json};
use matchday::domain::EventId;
use matchday::error::ClientError;
use matchday::service::RegistrationState;
use matchday::view::ViewScope;
use serde_json::json;

async fn logged_in_stub() -> (Stub, matchday::app_state::AppState) {
    let stub = Stub::start().await;
    stub.state().events = vec![event_json(3, "Futsal", "sari")];
    let (app, _) = stub.app();
    assert!(app.accounts.login("budi", PASSWORD).await.is_ok());
    (stub, app)
}

#[tokio::test]
async fn check_matches_string_user_id() {
    let (stub, app) = logged_in_stub().await;
    stub.state().participants = vec![participant_json(1, 3, 8), participant_json(2, 3, ACCOUNT_ID)];

    let flow = app.registration(EventId::new(3));
    assert!(matches!(flow.check_registration_status().await, Ok(true)));
    assert_eq!(flow.state(), RegistrationState::Registered);
}

#[tokio::test]
async fn check_accepts_string_account_ids() {
    let (stub, app) = logged_in_stub().await;
    stub.state().participants = vec![json!({
        "id": 1,
        "event_id": 3,
        "account_id": "7",
        "participant_name": "budi"
    })];

    let flow = app.registration(EventId::new(3));
    assert!(matches!(flow.check_registration_status().await, Ok(true)));
    assert_eq!(flow.state(), RegistrationState::Registered);
}

#[tokio::test]
async fn empty_participant_list_is_not_registered() {
    let (_stub, app) = logged_in_stub().await;

    let flow = app.registration(EventId::new(3));
    assert!(matches!(flow.check_registration_status().await, Ok(false)));
    assert_eq!(flow.state(), RegistrationState::NotRegistered);
}

#[tokio::test]
async fn register_refetches_and_becomes_registered() {
    let (stub, app) = logged_in_stub().await;
    let flow = app.registration(EventId::new(3));
    let states = flow.subscribe();

    assert!(flow.register().await.is_ok());
    assert_eq!(flow.state(), RegistrationState::Registered);
    assert!(states.has_changed().unwrap_or(false));

    let state = stub.state();
    assert_eq!(state.participant_posts, 1);
    let Some(row) = state.participants.first() else {
        panic!("participant row expected");
    };
    assert_eq!(row.get("account_id"), Some(&json!(ACCOUNT_ID)));
    assert_eq!(row.get("participant_name"), Some(&json!("budi")));
}

#[tokio::test]
async fn register_failure_joins_server_messages() {
    let (stub, app) = logged_in_stub().await;
    stub.state().register_error = Some(json!(["a", "b"]));

    let flow = app.registration(EventId::new(3));
    let Err(err) = flow.register().await else {
        panic!("registration should fail");
    };
    assert_eq!(err.user_message("fallback"), "a, b");
    assert_eq!(flow.state(), RegistrationState::Failed("a, b".to_string()));
}

#[tokio::test]
async fn double_submit_sends_one_request() {
    let (stub, app) = logged_in_stub().await;
    stub.state().register_delay = Duration::from_millis(200);

    let flow = app.registration(EventId::new(3));
    let (first, second) = tokio::join!(flow.register(), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
        flow.register().await
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(ClientError::RegistrationInFlight(id)) if id == EventId::new(3)));
    assert_eq!(stub.state().participant_posts, 1);
}

#[tokio::test]
async fn registering_twice_is_rejected_locally() {
    let (stub, app) = logged_in_stub().await;
    let flow = app.registration(EventId::new(3));

    assert!(flow.register().await.is_ok());
    assert!(matches!(
        flow.register().await,
        Err(ClientError::AlreadyRegistered(_))
    ));
    assert_eq!(stub.state().participant_posts, 1);
}

#[tokio::test]
async fn register_without_session_sends_nothing() {
    let stub = Stub::start().await;
    let (app, _) = stub.app();

    let flow = app.registration(EventId::new(3));
    assert!(matches!(flow.register().await, Err(ClientError::NotLoggedIn)));
    assert_eq!(stub.state().participant_posts, 0);
}

#[tokio::test]
async fn cancelled_registration_can_be_retried() {
    let (stub, app) = logged_in_stub().await;
    stub.state().register_delay = Duration::from_millis(300);

    let flow = app.registration(EventId::new(3));
    let scope = ViewScope::new();
    let (first, ()) = tokio::join!(scope.run(flow.register()), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        scope.cancel();
    });
    assert!(matches!(first, Err(ClientError::Cancelled)));
    assert_eq!(flow.state(), RegistrationState::Unknown);

    stub.state().register_delay = Duration::ZERO;
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(flow.register().await.is_ok());
    assert_eq!(flow.state(), RegistrationState::Registered);
    assert!(flow.check_registration_status().await.is_ok());
}
