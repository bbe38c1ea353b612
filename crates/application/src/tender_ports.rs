use async_trait::async_trait;
use bouwdesk_core::AppResult;
use bouwdesk_domain::{
    ChecklistItem, Decision, DecisionDraft, DecisionId, GoNoGoChecklist, ProfileId, Tender,
    TenderId, TenderStatus, TransitionPlan,
};
use serde_json::Value;

/// Largest page size accepted by tender listings.
pub const TENDER_LIST_LIMIT_MAX: usize = 200;

/// Query parameters for tender listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderListQuery {
    /// Optional status filter.
    pub status: Option<TenderStatus>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
}

impl Default for TenderListQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}

/// Result of an atomically committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTransition {
    /// Tender as stored after the commit.
    pub tender: Tender,
    /// Decision appended in the same commit, if the transition recorded one.
    pub decision: Option<Decision>,
}

/// Repository port for tender records.
#[async_trait]
pub trait TenderRepository: Send + Sync {
    /// Stores a newly ingested tender; fails with `Conflict` on duplicate ids.
    async fn insert_tender(&self, tender: Tender) -> AppResult<()>;

    /// Finds one tender by id.
    async fn find_tender(&self, tender_id: TenderId) -> AppResult<Option<Tender>>;

    /// Lists tenders, most recently updated first.
    async fn list_tenders(&self, query: TenderListQuery) -> AppResult<Vec<Tender>>;

    /// Commits a planned transition with compare-and-swap on `plan.from()`.
    ///
    /// Status, checklist and decision are written together or not at all.
    /// Fails with `NotFound` for unknown tenders and `Conflict` when the
    /// stored status no longer equals the planned source status.
    async fn commit_transition(
        &self,
        tender_id: TenderId,
        plan: TransitionPlan,
    ) -> AppResult<CommittedTransition>;
}

/// Append-only decision log port.
#[async_trait]
pub trait DecisionLogRepository: Send + Sync {
    /// Appends one decision stamped with the server clock.
    async fn append_decision(
        &self,
        tender_id: TenderId,
        draft: DecisionDraft,
    ) -> AppResult<DecisionId>;

    /// Lists decisions for one tender, newest first.
    async fn list_decisions(&self, tender_id: TenderId) -> AppResult<Vec<Decision>>;
}

/// Events published to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationEvent {
    /// A tender moved between administrative states.
    TenderStatusChanged,
    /// A Go/No-Go decision was recorded.
    TenderDecisionRecorded,
}

impl NotificationEvent {
    /// Returns the stable event name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TenderStatusChanged => "tender.status_changed",
            Self::TenderDecisionRecorded => "tender.decision_recorded",
        }
    }
}

/// Best-effort outbound notification port.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publishes one event; callers never abort on failure.
    async fn notify(&self, event: NotificationEvent, payload: Value) -> AppResult<()>;
}

/// Input for tender status changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTenderInput {
    /// Requested target status.
    pub status: TenderStatus,
    /// Justification, required for `go` and `no_go`.
    pub decision_reason: Option<String>,
    /// Deciding profile claimed by the client; must equal the caller.
    pub decision_by: Option<ProfileId>,
    /// Checklist entries stored together with the change.
    pub checklist: Option<GoNoGoChecklist>,
}

/// Result of a tender status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Tender as stored after the change.
    pub tender: Tender,
    /// Decision appended by the change, if any.
    pub decision: Option<Decision>,
    /// Checklist items left unchecked; advisory only.
    pub unchecked_items: Vec<ChecklistItem>,
}

/// Result of a checklist save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistOutcome {
    /// Tender as stored after the save.
    pub tender: Tender,
    /// Checklist items left unchecked; advisory only.
    pub unchecked_items: Vec<ChecklistItem>,
}
