//! SMTP notifier using the `lettre` crate.

use async_trait::async_trait;
use bouwdesk_application::{NotificationEvent, Notifier};
use bouwdesk_core::{AppError, AppResult};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::Value;

/// SMTP notifier configuration.
#[derive(Clone)]
pub struct SmtpNotifierConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender email address.
    pub from_address: String,
    /// Recipient of tender notifications, typically a bid team mailbox.
    pub to_address: String,
}

/// Notifier that mails tender events to a fixed recipient.
#[derive(Clone)]
pub struct SmtpNotifier {
    config: SmtpNotifierConfig,
}

impl SmtpNotifier {
    /// Creates a new SMTP notifier.
    #[must_use]
    pub fn new(config: SmtpNotifierConfig) -> Self {
        Self { config }
    }
}

/// Renders the subject line and plain-text body for one event.
fn render_message(event: NotificationEvent, payload: &Value) -> (String, String) {
    let title = payload
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("onbekende tender");

    match event {
        NotificationEvent::TenderDecisionRecorded => {
            let summary = payload
                .pointer("/decision/summary")
                .and_then(Value::as_str)
                .unwrap_or_default();
            (
                format!("Go/No-Go besluit: {title}"),
                format!("{title}\n\n{summary}\n"),
            )
        }
        NotificationEvent::TenderStatusChanged => {
            let from = payload.get("from").and_then(Value::as_str).unwrap_or("?");
            let to = payload.get("to").and_then(Value::as_str).unwrap_or("?");
            (
                format!("Tenderstatus gewijzigd: {title}"),
                format!("{title}\n\nStatus: {from} -> {to}\n"),
            )
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, event: NotificationEvent, payload: Value) -> AppResult<()> {
        let (subject, body) = render_message(event, &payload);

        let from = self
            .config
            .from_address
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid from address: {error}")))?;

        let to_mailbox = self
            .config
            .to_address
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid recipient address: {error}")))?;

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|error| AppError::Internal(format!("failed to build email: {error}")))?;

        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
            .map_err(|error| {
                AppError::Dependency(format!("failed to create SMTP transport: {error}"))
            })?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        mailer
            .send(message)
            .await
            .map_err(|error| AppError::Dependency(format!("failed to send email: {error}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bouwdesk_application::NotificationEvent;
    use serde_json::json;

    use super::render_message;

    #[test]
    fn decision_mail_carries_summary() {
        let (subject, body) = render_message(
            NotificationEvent::TenderDecisionRecorded,
            &json!({
                "title": "Renovatie brug N325",
                "decision": { "summary": "GO by Sanne Bakker at 2026-03-02T09:00:00Z: fits capacity" }
            }),
        );

        assert_eq!(subject, "Go/No-Go besluit: Renovatie brug N325");
        assert!(body.contains("GO by Sanne Bakker"));
    }

    #[test]
    fn status_mail_lists_edge() {
        let (_, body) = render_message(
            NotificationEvent::TenderStatusChanged,
            &json!({ "title": "Kademuren", "from": "submitted", "to": "won" }),
        );

        assert!(body.contains("submitted -> won"));
    }
}
