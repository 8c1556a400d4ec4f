//! API client integration tests against the mock server.

mod common;

use common::mock_api::{MockApi, MockResponse};
use common::{make_client, users_body};
use fieldbook::api::types::{NewForm, NewPerson, NewUser, PersonName};
use fieldbook::api::ApiError;

#[tokio::test]
async fn list_users_decodes_the_results_envelope() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(&users_body(&[
        ("u-1", "Ada Lovelace"),
        ("u-2", "Grace Hopper"),
    ])))
    .await;

    let client = make_client(&mock.base_url());
    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].person.display, "Ada Lovelace");
    assert_eq!(users[1].uuid, "u-2");

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/users");
}

#[tokio::test]
async fn missing_results_key_lists_as_empty() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json("{}")).await;

    let client = make_client(&mock.base_url());
    let forms = client.list_forms().await.unwrap();
    assert!(forms.is_empty());
}

#[tokio::test]
async fn error_status_carries_the_server_message() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::error(409, "username already taken"))
        .await;

    let client = make_client(&mock.base_url());
    let err = client
        .create_user(&NewUser {
            username: "ada".to_string(),
            password: "pw".to_string(),
            person: "p-1".to_string(),
            roles: vec![],
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "'users' returned 409: username already taken");
}

#[tokio::test]
async fn unreachable_server_maps_to_a_transport_error() {
    // Bind-then-drop leaves a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = make_client(&format!("http://127.0.0.1:{port}/api"));

    let err = client.list_roles().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert!(err.to_string().contains("roles"));
}

#[tokio::test]
async fn create_person_posts_the_camel_case_payload() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(
        r#"{"uuid": "p-77", "display": "Ada Lovelace"}"#,
    ))
    .await;

    let client = make_client(&mock.base_url());
    let created = client
        .create_person(&NewPerson {
            names: vec![PersonName {
                given_name: "Ada".to_string(),
                family_name: "Lovelace".to_string(),
            }],
            gender: "F".to_string(),
            age: Some(36),
            birthdate: None,
        })
        .await
        .unwrap();
    assert_eq!(created.uuid, "p-77");

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/persons");
    let body = requests[0].json();
    assert_eq!(body["names"][0]["givenName"], "Ada");
    assert_eq!(body["gender"], "F");
    assert_eq!(body["age"], 36);
    assert!(body.get("birthdate").is_none());
}

#[tokio::test]
async fn create_form_posts_name_and_period_type() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json(
        r#"{"uuid": "f-5", "name": "Stock report", "periodType": "Monthly"}"#,
    ))
    .await;

    let client = make_client(&mock.base_url());
    let form = client
        .create_form(&NewForm {
            name: "Stock report".to_string(),
            period_type: Some("Monthly".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(form.uuid, "f-5");

    let body = mock.captured_requests().await[0].json();
    assert_eq!(body["name"], "Stock report");
    assert_eq!(body["periodType"], "Monthly");
}

#[tokio::test]
async fn delete_targets_the_resource_by_uuid() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json("{}")).await;

    let client = make_client(&mock.base_url());
    client.delete_user("u-42").await.unwrap();

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/users/u-42");
}

#[tokio::test]
async fn every_request_carries_a_request_id() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json("{}")).await;

    let client = make_client(&mock.base_url());
    client.list_users().await.unwrap();

    let requests = mock.captured_requests().await;
    let id = requests[0].header("x-request-id").expect("request id");
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn bearer_token_is_read_from_the_configured_env_var() {
    let mock = MockApi::start().await;
    mock.enqueue(MockResponse::json("{}")).await;
    mock.enqueue(MockResponse::json("{}")).await;

    let mut config = common::api_config(&mock.base_url());
    config.token_env = "FIELDBOOK_TEST_TOKEN_7301".to_string();
    let client = fieldbook::api::ApiClient::new(&config);

    // Unset: no authorization header at all.
    client.list_users().await.unwrap();

    std::env::set_var("FIELDBOOK_TEST_TOKEN_7301", "sekrit");
    client.list_users().await.unwrap();
    std::env::remove_var("FIELDBOOK_TEST_TOKEN_7301");

    let requests = mock.captured_requests().await;
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(requests[1].header("authorization"), Some("Bearer sekrit"));
}
