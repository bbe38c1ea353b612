use std::time::Duration;

use async_trait::async_trait;
use bouwdesk_application::{NotificationEvent, Notifier};
use bouwdesk_core::{AppError, AppResult};
use chrono::Utc;
use serde_json::{Value, json};

/// Notifier that posts tender events to an HTTP webhook.
pub struct WebhookNotifier {
    http_client: reqwest::Client,
    endpoint: String,
    max_attempts: u8,
    retry_backoff_ms: u64,
}

impl WebhookNotifier {
    /// Creates a new webhook notifier.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        endpoint: impl Into<String>,
        max_attempts: u8,
        retry_backoff_ms: u64,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            max_attempts: max_attempts.max(1),
            retry_backoff_ms: retry_backoff_ms.max(50),
        }
    }
}

fn envelope(event: NotificationEvent, payload: Value) -> Value {
    json!({
        "event": event.as_str(),
        "sent_at": Utc::now(),
        "payload": payload,
    })
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: NotificationEvent, payload: Value) -> AppResult<()> {
        let body = envelope(event, payload);
        let mut attempt = 0_u8;
        let mut last_error: Option<String> = None;

        while attempt < self.max_attempts {
            attempt = attempt.saturating_add(1);
            let response = self
                .http_client
                .post(self.endpoint.as_str())
                .header("X-Bouwdesk-Event", event.as_str())
                .json(&body)
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response)
                    if response.status().is_server_error()
                        || response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS =>
                {
                    last_error = Some(format!(
                        "transient HTTP status {} for webhook event '{}'",
                        response.status(),
                        event.as_str()
                    ));
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
                    return Err(AppError::Dependency(format!(
                        "webhook rejected event '{}' with status {status}: {body}",
                        event.as_str()
                    )));
                }
                Err(error) => {
                    last_error = Some(format!("webhook transport error: {error}"));
                }
            }

            if attempt < self.max_attempts {
                let delay = self.retry_backoff_ms.saturating_mul(u64::from(attempt));
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }

        Err(AppError::Dependency(last_error.unwrap_or_else(|| {
            "webhook delivery exhausted retries".to_owned()
        })))
    }
}
