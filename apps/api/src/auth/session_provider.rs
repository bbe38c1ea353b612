use async_trait::async_trait;
use bouwdesk_application::SessionProvider;
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::Profile;
use chrono::Utc;
use tower_sessions::Session;
use tracing::debug;

use super::{SESSION_ABSOLUTE_TIMEOUT_SECONDS, SESSION_CREATED_AT_KEY, SESSION_PROFILE_KEY};

/// Adapts one request's `tower_sessions` session to the session port.
pub struct TowerSessionProvider {
    session: Session,
}

impl TowerSessionProvider {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionProvider for TowerSessionProvider {
    async fn current_profile(&self) -> AppResult<Option<Profile>> {
        let created_at = self
            .session
            .get::<i64>(SESSION_CREATED_AT_KEY)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to read session creation time: {error}"))
            })?;

        if created_at.is_some_and(|created_at| {
            Utc::now().timestamp().saturating_sub(created_at) > SESSION_ABSOLUTE_TIMEOUT_SECONDS
        }) {
            debug!("session exceeded absolute lifetime");
            self.session.flush().await.map_err(|error| {
                AppError::Internal(format!("failed to flush expired session: {error}"))
            })?;
            return Ok(None);
        }

        self.session
            .get::<Profile>(SESSION_PROFILE_KEY)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read session profile: {error}")))
    }
}
