use std::sync::Arc;

use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{PermissionTable, Profile, Role};
use tracing::warn;

use crate::audit_ports::append_audit_event_best_effort;
use crate::{AuditAction, AuditEvent, AuditRepository, SessionProvider};

mod checks;
mod navigation;

/// Application service answering and enforcing access-control questions.
///
/// The permission table is injected once at startup and never mutated.
#[derive(Clone)]
pub struct Authorizer {
    permissions: Arc<PermissionTable>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl Authorizer {
    /// Creates an authorizer over an immutable permission table.
    #[must_use]
    pub fn new(
        permissions: Arc<PermissionTable>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            permissions,
            audit_repository,
        }
    }

    /// Returns the injected permission table.
    #[must_use]
    pub fn permission_table(&self) -> &PermissionTable {
        &self.permissions
    }

    /// Returns the session profile or fails with `Unauthorized`.
    pub async fn require_authenticated(
        &self,
        sessions: &dyn SessionProvider,
    ) -> AppResult<Profile> {
        sessions
            .current_profile()
            .await?
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))
    }

    /// Returns the session profile when its role dominates `role`.
    ///
    /// Fails with `Unauthorized` without a session and `Forbidden` when the
    /// session role is too low or incomparable. A known caller with too
    /// little rank is a permission failure, so it shares `Forbidden` with
    /// route and action denials rather than `Unauthorized`.
    pub async fn require_role(
        &self,
        sessions: &dyn SessionProvider,
        role: Role,
    ) -> AppResult<Profile> {
        let profile = self.require_authenticated(sessions).await?;
        if profile.role().dominates(role) {
            return Ok(profile);
        }

        self.record_denial(&profile, "role", role.as_str()).await;
        Err(AppError::Forbidden(format!(
            "role '{}' does not satisfy required role '{}'",
            profile.role(),
            role
        )))
    }

    async fn record_denial(&self, profile: &Profile, resource_type: &str, resource_id: &str) {
        warn!(
            profile_id = %profile.id(),
            role = profile.role().as_str(),
            resource_type,
            resource_id,
            "access denied"
        );

        append_audit_event_best_effort(
            self.audit_repository.as_ref(),
            AuditEvent {
                subject: profile.id().to_string(),
                action: AuditAction::AccessDenied,
                resource_type: resource_type.to_owned(),
                resource_id: resource_id.to_owned(),
                detail: Some(format!("role '{}' denied", profile.role())),
            },
        )
        .await;
    }
}
