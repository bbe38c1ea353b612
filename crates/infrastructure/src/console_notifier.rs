//! Console notifier for development. Logs notifications to tracing output.

use async_trait::async_trait;
use bouwdesk_application::{NotificationEvent, Notifier};
use bouwdesk_core::AppResult;
use serde_json::Value;
use tracing::info;

/// Development notifier that logs events to the console.
#[derive(Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Creates a new console notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, event: NotificationEvent, payload: Value) -> AppResult<()> {
        info!(
            event = event.as_str(),
            "--- NOTIFICATION (console) ---\n{}\n--- END NOTIFICATION ---",
            payload
        );

        Ok(())
    }
}
