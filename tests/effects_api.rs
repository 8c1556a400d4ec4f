//! Effect runner against the mock API: one command in, exactly one
//! follow-up action out.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_api::{MockApi, MockResponse};
use common::{make_client, users_body};
use fieldbook::api::types::{NewPerson, PersonName, UserDraft};
use fieldbook::store::users::{UsersAction, UsersReducer, UsersState};
use fieldbook::store::{Action, ActionSink, Command, EffectRunner, Reducer};
use tokio::sync::mpsc;

/// Spawn a runner wired to the mock; returns the command side and the
/// follow-up action stream.
fn start_runner(base_url: &str) -> (mpsc::Sender<Command>, mpsc::UnboundedReceiver<Action>) {
    let (command_tx, command_rx) = mpsc::channel(16);
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let publish: ActionSink = Arc::new(move |action| {
        let _ = action_tx.send(action);
    });
    tokio::spawn(EffectRunner::new(make_client(base_url), command_rx, publish).run());
    (command_tx, action_rx)
}

async fn next_action(rx: &mut mpsc::UnboundedReceiver<Action>) -> Action {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for follow-up action")
        .expect("action channel closed")
}

async fn assert_no_more_actions(rx: &mut mpsc::UnboundedReceiver<Action>) {
    let extra = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
    assert!(extra.is_err(), "unexpected extra follow-up: {extra:?}");
}

fn sample_draft() -> UserDraft {
    UserDraft {
        person: NewPerson {
            names: vec![PersonName {
                given_name: "Ada".to_string(),
                family_name: "Lovelace".to_string(),
            }],
            gender: "F".to_string(),
            age: None,
            birthdate: None,
        },
        username: "ada".to_string(),
        password: "s3cret".to_string(),
        roles: vec!["r-1".to_string(), "r-2".to_string()],
    }
}

#[tokio::test]
async fn load_users_publishes_one_success_action() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&users_body(&[("u-1", "Ada Lovelace")])))
        .await;

    let (commands, mut actions) = start_runner(&mock.base_url());
    commands.send(Command::LoadUsers).await.unwrap();

    match next_action(&mut actions).await {
        Action::Users(UsersAction::LoadSuccess { users }) => {
            assert_eq!(users.len(), 1);
            assert_eq!(users[0].uuid, "u-1");
        }
        other => panic!("expected load success, got {}", other.name()),
    }
    assert_no_more_actions(&mut actions).await;
}

#[tokio::test]
async fn load_failure_publishes_one_fail_action() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::error(500, "database down")).await;

    let (commands, mut actions) = start_runner(&mock.base_url());
    commands.send(Command::LoadUsers).await.unwrap();

    match next_action(&mut actions).await {
        Action::Users(UsersAction::LoadFail { message }) => {
            assert!(message.contains("500"), "message: {message}");
            assert!(message.contains("database down"), "message: {message}");
        }
        other => panic!("expected load fail, got {}", other.name()),
    }
    assert_no_more_actions(&mut actions).await;
}

#[tokio::test]
async fn create_user_chains_person_then_account() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(
        r#"{"uuid": "p-77", "display": "Ada Lovelace"}"#,
    ))
    .await;
    mock.enqueue(MockResponse::json(
        r#"{
            "uuid": "u-9",
            "username": "ada",
            "person": {"uuid": "p-77", "display": "Ada Lovelace"},
            "roles": []
        }"#,
    ))
    .await;

    let (commands, mut actions) = start_runner(&mock.base_url());
    commands
        .send(Command::CreateUser {
            draft: sample_draft(),
        })
        .await
        .unwrap();

    match next_action(&mut actions).await {
        Action::Users(UsersAction::CreateSuccess { user }) => {
            assert_eq!(user.uuid, "u-9");
        }
        other => panic!("expected create success, got {}", other.name()),
    }
    assert_no_more_actions(&mut actions).await;

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/api/persons");
    assert_eq!(requests[1].path, "/api/users");
    // The account payload references the person the first call created.
    let account = requests[1].json();
    assert_eq!(account["person"], "p-77");
    assert_eq!(account["roles"], serde_json::json!(["r-1", "r-2"]));
}

#[tokio::test]
async fn create_user_person_failure_short_circuits() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::error(400, "birthdate in the future"))
        .await;

    let (commands, mut actions) = start_runner(&mock.base_url());
    commands
        .send(Command::CreateUser {
            draft: sample_draft(),
        })
        .await
        .unwrap();

    match next_action(&mut actions).await {
        Action::Users(UsersAction::CreateFail { message }) => {
            assert!(message.contains("birthdate in the future"), "message: {message}");
        }
        other => panic!("expected create fail, got {}", other.name()),
    }
    assert_no_more_actions(&mut actions).await;

    // The account call never went out.
    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/persons");
}

#[tokio::test]
async fn delete_success_carries_the_uuid_back() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json("{}")).await;

    let (commands, mut actions) = start_runner(&mock.base_url());
    commands
        .send(Command::DeleteUser {
            uuid: "u-42".to_string(),
        })
        .await
        .unwrap();

    match next_action(&mut actions).await {
        Action::Users(UsersAction::DeleteSuccess { uuid }) => assert_eq!(uuid, "u-42"),
        other => panic!("expected delete success, got {}", other.name()),
    }
}

#[tokio::test]
async fn overlapping_loads_resolve_in_arrival_order() {
    let mock = MockApi::start().await;
    // First request is slow and returns Ada; second is fast with Grace.
    mock.enqueue(MockResponse::json(&users_body(&[("u-1", "Ada Lovelace")])).with_delay(200))
        .await;
    mock.enqueue(MockResponse::json(&users_body(&[("u-2", "Grace Hopper")])))
        .await;

    let (commands, mut actions) = start_runner(&mock.base_url());
    commands.send(Command::LoadUsers).await.unwrap();
    // Hold the second command until the first request reached the server,
    // so the scripted responses pair up deterministically.
    for _ in 0..100 {
        if !mock.captured_requests().await.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    commands.send(Command::LoadUsers).await.unwrap();

    let first = next_action(&mut actions).await;
    let second = next_action(&mut actions).await;

    // Both outcomes arrive; the delayed one lands last.
    let mut state = UsersState::with_page_size(10);
    state = UsersReducer::reduce(state, &first);
    state = UsersReducer::reduce(state, &second);

    // Whatever arrived last owns the slice, even though its request was
    // issued first.
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].uuid, "u-1");
    match second {
        Action::Users(UsersAction::LoadSuccess { users }) => {
            assert_eq!(users[0].person.display, "Ada Lovelace");
        }
        other => panic!("expected the delayed success last, got {}", other.name()),
    }
}
