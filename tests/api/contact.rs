use std::sync::Arc;

use autogen::domain::SubmissionResult;

use crate::helpers::{
    jane_doe, spawn_app, spawn_app_with_smtp, spawn_app_with_transport, unused_port,
    RecordingTransport, RejectingTransport, REJECTION_DETAIL,
};

#[tokio::test]
async fn contact_returns_200_and_delivers_when_transport_succeeds() {
    // GIVEN
    let transport = Arc::new(RecordingTransport::default());
    let app = spawn_app_with_transport(Some(transport.clone())).await;

    // WHEN
    let response = app.post_contact(jane_doe()).await;

    // THEN
    assert_eq!(200, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(result.success);
    assert!(!result.message.is_empty());

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply_to.as_ref(), "jane@example.com");
    for value in ["Jane Doe", "jane@example.com", "07700000000", "Line1\nLine2"] {
        assert!(
            sent[0].text_body.contains(value),
            "The notification body did not contain {value}"
        );
    }
}

#[tokio::test]
async fn contact_returns_200_without_credentials() {
    // GIVEN
    let app = spawn_app().await;

    // WHEN
    let response = app.post_contact(jane_doe()).await;

    // THEN
    assert_eq!(200, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(result.success);
    assert!(!result.message.is_empty());
}

#[tokio::test]
async fn missing_credentials_never_contact_the_mail_host() {
    // GIVEN
    // Nothing listens on this port, so any delivery attempt would fail with a 500.
    let app = spawn_app_with_smtp(unused_port(), false).await;

    // WHEN
    let response = app.post_contact(jane_doe()).await;

    // THEN
    assert_eq!(200, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(result.success);
}

#[tokio::test]
async fn contact_returns_500_when_transport_fails() {
    // GIVEN
    let app = spawn_app_with_transport(Some(Arc::new(RejectingTransport))).await;

    // WHEN
    let response = app.post_contact(jane_doe()).await;

    // THEN
    assert_eq!(500, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(!result.success);
    assert!(!result.message.is_empty());
    assert!(!result.message.contains(REJECTION_DETAIL));
}

#[tokio::test]
async fn contact_returns_500_when_the_smtp_relay_is_unreachable() {
    // GIVEN
    let app = spawn_app_with_smtp(unused_port(), true).await;

    // WHEN
    let response = app.post_contact(jane_doe()).await;

    // THEN
    assert_eq!(500, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(!result.success);
    assert!(!result.message.contains("localhost"));
}

#[tokio::test]
async fn identical_submissions_are_delivered_independently() {
    // GIVEN
    let transport = Arc::new(RecordingTransport::default());
    let app = spawn_app_with_transport(Some(transport.clone())).await;

    // WHEN
    let first = app.post_contact(jane_doe()).await;
    let second = app.post_contact(jane_doe()).await;

    // THEN
    assert_eq!(200, first.status().as_u16());
    assert_eq!(200, second.status().as_u16());
    assert_eq!(transport.sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn contact_returns_400_on_incomplete_or_invalid_body() {
    // GIVEN
    let transport = Arc::new(RecordingTransport::default());
    let app = spawn_app_with_transport(Some(transport.clone())).await;
    let test_cases = [
        (
            serde_json::json!({"email": "jane@example.com", "phone": "07700000000", "message": "Hi"}),
            "no name",
        ),
        (
            serde_json::json!({"name": "Jane", "phone": "07700000000", "message": "Hi"}),
            "no email",
        ),
        (
            serde_json::json!({"name": "Jane", "email": "jane@example.com", "message": "Hi"}),
            "no phone",
        ),
        (
            serde_json::json!({"name": "Jane", "email": "jane@example.com", "phone": "07700000000"}),
            "no message",
        ),
        (
            serde_json::json!({"name": "", "email": "jane@example.com", "phone": "07700000000", "message": "Hi"}),
            "an empty name",
        ),
        (
            serde_json::json!({"name": "Jane", "email": "janeexample.com", "phone": "07700000000", "message": "Hi"}),
            "no @ sign in email",
        ),
        (
            serde_json::json!({"name": "Jane", "email": "jane@example.com", "phone": "   ", "message": "Hi"}),
            "a blank phone number",
        ),
        (serde_json::json!({}), "no fields at all"),
    ];

    for (invalid_body, why_invalid_body_message) in test_cases {
        // WHEN
        let response = app.post_contact(invalid_body).await;

        // THEN
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with Bad Request (400) when the body had {why_invalid_body_message}"
        );
        let result: SubmissionResult = response.json().await.expect("Invalid response body");
        assert!(!result.success);
        assert!(!result.message.is_empty());
    }

    assert!(transport.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn contact_returns_400_on_malformed_json() {
    // GIVEN
    let app = spawn_app().await;

    // WHEN
    let response = app.post_contact_raw("{\"name\": ".to_string()).await;

    // THEN
    assert_eq!(400, response.status().as_u16());
    let result: SubmissionResult = response.json().await.expect("Invalid response body");
    assert!(!result.success);
}

#[tokio::test]
async fn contact_accepts_free_form_names_and_phone_numbers() {
    // GIVEN
    let transport = Arc::new(RecordingTransport::default());
    let app = spawn_app_with_transport(Some(transport.clone())).await;
    let test_cases = [
        ("name", "Jane (Janey) Doe"),
        ("phone", "07700 900000 ext 12"),
        ("phone", "evenings only: 07700900000"),
    ];

    for (field, value) in test_cases {
        let mut body = jane_doe();
        body[field] = serde_json::json!(value);

        // WHEN
        let response = app.post_contact(body).await;

        // THEN
        assert_eq!(
            200,
            response.status().as_u16(),
            "The API rejected a submission with {field} = {value:?}"
        );
    }

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].text_body.contains("Jane (Janey) Doe"));
    assert!(sent[1].text_body.contains("07700 900000 ext 12"));
    assert!(sent[2].text_body.contains("evenings only: 07700900000"));
}

#[tokio::test]
async fn undecodable_bodies_are_explained_by_kind() {
    // GIVEN
    let app = spawn_app().await;

    // WHEN
    let wrong_type = app
        .post_contact(serde_json::json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": 7700900000u64,
            "message": "Hi",
        }))
        .await;
    let wrong_content_type = reqwest::Client::new()
        .post(format!("{}/api/contact", app.address))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("name=Jane")
        .send()
        .await
        .expect("Could not send request");

    // THEN
    assert_eq!(400, wrong_type.status().as_u16());
    let wrong_type: SubmissionResult = wrong_type.json().await.expect("Invalid response body");
    assert!(!wrong_type.success);
    assert!(wrong_type.message.contains("must all be text"));

    assert_eq!(400, wrong_content_type.status().as_u16());
    let wrong_content_type: SubmissionResult =
        wrong_content_type.json().await.expect("Invalid response body");
    assert!(!wrong_content_type.success);
    assert!(wrong_content_type.message.contains("JSON"));
}
