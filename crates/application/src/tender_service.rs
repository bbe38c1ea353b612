use std::sync::Arc;

use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{
    Action, DecisionActor, GoNoGoChecklist, Profile, Tender, TenderDetails, TenderId,
    plan_checklist_update, plan_transition,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::audit_ports::append_audit_event_best_effort;
use crate::tender_ports::{
    ChecklistOutcome, CommittedTransition, NotificationEvent, Notifier, TENDER_LIST_LIMIT_MAX,
    TenderListQuery, TenderRepository, TransitionOutcome, TransitionTenderInput,
};
use crate::{AuditAction, AuditEvent, AuditRepository, Authorizer};

mod checklist;
mod ingest;
mod notifications;
mod transition;

/// Tender lifecycle service: ingestion, queries, Go/No-Go review and
/// administrative transitions.
///
/// Every operation authorizes the caller before touching storage.
#[derive(Clone)]
pub struct TenderService {
    authorizer: Authorizer,
    repository: Arc<dyn TenderRepository>,
    notifier: Arc<dyn Notifier>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TenderService {
    /// Creates a tender service.
    #[must_use]
    pub fn new(
        authorizer: Authorizer,
        repository: Arc<dyn TenderRepository>,
        notifier: Arc<dyn Notifier>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorizer,
            repository,
            notifier,
            audit_repository,
        }
    }

    async fn load_tender(&self, tender_id: TenderId) -> AppResult<Tender> {
        self.repository
            .find_tender(tender_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tender '{tender_id}' does not exist")))
    }
}
