// Push gateway delivery
// Uses mockito for HTTP mocking

use field_weather_service::alerts::{Notification, NotificationCapability, NotifyError};
use mockito::{Matcher, Server};
use serde_json::json;

fn notification() -> Notification {
    Notification {
        title: "Frost Advisory".to_string(),
        body: "Frost possible in Boise: 36°F.".to_string(),
        data: json!({"city": "Boise"}),
    }
}

#[tokio::test]
async fn test_push_gateway_posts_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/push")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "to": "device-123",
            "title": "Frost Advisory",
            "data": {"city": "Boise"}
        })))
        .with_status(200)
        .create_async()
        .await;

    let capability = NotificationCapability::resolve(
        true,
        Some(format!("{}/push", server.url())),
        Some("device-123".to_string()),
    );
    capability.dispatch(&notification()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_push_gateway_rejection() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/push")
        .with_status(503)
        .create_async()
        .await;

    let capability =
        NotificationCapability::resolve(true, Some(format!("{}/push", server.url())), None);
    let result = capability.dispatch(&notification()).await;

    assert!(matches!(result, Err(NotifyError::Rejected(503))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_log_and_unavailable_never_fail() {
    let n = notification();
    assert!(NotificationCapability::Log.dispatch(&n).await.is_ok());
    assert!(NotificationCapability::Unavailable.dispatch(&n).await.is_ok());
}
