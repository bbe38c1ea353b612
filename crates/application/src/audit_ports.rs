use async_trait::async_trait;
use bouwdesk_core::AppResult;
use tracing::warn;

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditAction {
    /// Emitted when a route or action check denies a profile.
    AccessDenied,
    /// Emitted when a tender is ingested.
    TenderIngested,
    /// Emitted when a tender transition commits.
    TenderTransitioned,
    /// Emitted when a Go/No-Go checklist is saved.
    TenderChecklistSaved,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessDenied => "access.denied",
            Self::TenderIngested => "tender.ingested",
            Self::TenderTransitioned => "tender.transitioned",
            Self::TenderChecklistSaved => "tender.checklist_saved",
        }
    }
}

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Profile id of the actor.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}

/// Appends an audit event, logging instead of failing the caller.
pub(crate) async fn append_audit_event_best_effort(
    repository: &dyn AuditRepository,
    event: AuditEvent,
) {
    let action = event.action.as_str();
    let resource_id = event.resource_id.clone();
    if let Err(error) = repository.append_event(event).await {
        warn!(%error, action, resource_id, "failed to append audit event");
    }
}
