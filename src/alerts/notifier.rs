use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::db::AlertRecord;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Push request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Push gateway rejected notification with status {0}")]
    Rejected(u16),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

impl Notification {
    pub fn for_alert(alert: &AlertRecord) -> Self {
        Self {
            title: alert.alert_type.title().to_string(),
            body: alert.message.clone(),
            data: json!({
                "alertId": alert.id,
                "type": alert.alert_type,
                "severity": alert.severity,
                "city": alert.city,
            }),
        }
    }
}

#[derive(Serialize)]
struct PushPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    title: &'a str,
    body: &'a str,
    data: &'a serde_json::Value,
}

#[derive(Clone)]
pub struct PushGatewayClient {
    client: reqwest::Client,
    url: String,
    device_token: Option<String>,
}

impl PushGatewayClient {
    pub fn new(url: String, device_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url,
            device_token,
        }
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let payload = PushPayload {
            to: self.device_token.as_deref(),
            title: &notification.title,
            body: &notification.body,
            data: &notification.data,
        };

        let body = serde_json::to_string(&payload).unwrap_or_default();
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }
        debug!("Push gateway accepted notification ({})", status);
        Ok(())
    }
}

/// How (and whether) notifications can be delivered in this process.
///
/// Resolved once at startup and handed to the alert service. When
/// `Unavailable`, dispatch is skipped but alerts are still recorded.
#[derive(Clone)]
pub enum NotificationCapability {
    Unavailable,
    Log,
    PushGateway(PushGatewayClient),
}

impl NotificationCapability {
    pub fn resolve(
        enabled: bool,
        push_gateway_url: Option<String>,
        device_token: Option<String>,
    ) -> Self {
        match (enabled, push_gateway_url) {
            (false, _) => NotificationCapability::Unavailable,
            (true, Some(url)) => {
                NotificationCapability::PushGateway(PushGatewayClient::new(url, device_token))
            }
            (true, None) => NotificationCapability::Log,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, NotificationCapability::Unavailable)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            NotificationCapability::Unavailable => "unavailable",
            NotificationCapability::Log => "log",
            NotificationCapability::PushGateway(_) => "push-gateway",
        }
    }

    #[instrument(skip(self, notification), fields(channel = self.describe(), title = %notification.title))]
    pub async fn dispatch(&self, notification: &Notification) -> Result<(), NotifyError> {
        match self {
            NotificationCapability::Unavailable => {
                debug!("Notifications unavailable, skipping dispatch");
                Ok(())
            }
            NotificationCapability::Log => {
                info!(body = %notification.body, "Notification");
                Ok(())
            }
            NotificationCapability::PushGateway(client) => client.send(notification).await,
        }
    }
}
