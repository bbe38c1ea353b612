use std::sync::Arc;
use std::time::Duration;

use bouwdesk_application::Notifier;
use bouwdesk_core::AppError;
use bouwdesk_infrastructure::{ConsoleNotifier, SmtpNotifier, SmtpNotifierConfig, WebhookNotifier};

use crate::api_config::{ApiConfig, NotifierConfig};

pub(super) fn build_notifier(config: &ApiConfig) -> Result<Arc<dyn Notifier>, AppError> {
    let notifier: Arc<dyn Notifier> = match &config.notifier {
        NotifierConfig::Console => Arc::new(ConsoleNotifier::new()),
        NotifierConfig::Smtp(smtp) => Arc::new(SmtpNotifier::new(SmtpNotifierConfig {
            host: smtp.host.clone(),
            port: smtp.port,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            from_address: smtp.from_address.clone(),
            to_address: smtp.to_address.clone(),
        })),
        NotifierConfig::Webhook(webhook) => {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build webhook http client: {error}"))
                })?;
            Arc::new(WebhookNotifier::new(
                http_client,
                webhook.endpoint.as_str(),
                webhook.max_attempts,
                webhook.retry_backoff_ms,
            ))
        }
    };

    Ok(notifier)
}
