use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{
    Decision, DecisionDraft, DecisionId, GoNoGoChecklist, PermissionTable, Profile, ProfileId,
    Role, Tender, TenderDetails, TenderId, TenderStatus, TransitionPlan,
};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    AuditEvent, AuditRepository, Authorizer, CommittedTransition, DecisionLogRepository,
    NotificationEvent, Notifier, TenderListQuery, TenderRepository,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
struct StoreState {
    tenders: HashMap<TenderId, Tender>,
    decisions: Vec<Decision>,
}

/// Tender and decision store sharing one lock, like the real adapters.
#[derive(Default)]
pub(crate) struct FakeTenderStore {
    state: Mutex<StoreState>,
}

impl FakeTenderStore {
    pub(crate) async fn decisions(&self) -> Vec<Decision> {
        self.state.lock().await.decisions.clone()
    }

    pub(crate) async fn stored(&self, tender_id: TenderId) -> Option<Tender> {
        self.state.lock().await.tenders.get(&tender_id).cloned()
    }
}

fn append_locked(state: &mut StoreState, tender_id: TenderId, draft: DecisionDraft) -> Decision {
    let decision = draft.into_decision(DecisionId::new(), tender_id, Utc::now());
    state.decisions.push(decision.clone());
    decision
}

#[async_trait]
impl TenderRepository for FakeTenderStore {
    async fn insert_tender(&self, tender: Tender) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state.tenders.contains_key(&tender.id()) {
            return Err(AppError::Conflict(format!(
                "tender '{}' already exists",
                tender.id()
            )));
        }
        state.tenders.insert(tender.id(), tender);
        Ok(())
    }

    async fn find_tender(&self, tender_id: TenderId) -> AppResult<Option<Tender>> {
        Ok(self.state.lock().await.tenders.get(&tender_id).cloned())
    }

    async fn list_tenders(&self, query: TenderListQuery) -> AppResult<Vec<Tender>> {
        let state = self.state.lock().await;
        let mut tenders: Vec<Tender> = state
            .tenders
            .values()
            .filter(|tender| query.status.is_none_or(|status| tender.status() == status))
            .cloned()
            .collect();
        tenders.sort_by_key(|tender| std::cmp::Reverse(tender.updated_at()));
        Ok(tenders
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn commit_transition(
        &self,
        tender_id: TenderId,
        plan: TransitionPlan,
    ) -> AppResult<CommittedTransition> {
        let mut state = self.state.lock().await;
        let mut tender = state
            .tenders
            .get(&tender_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("tender '{tender_id}' does not exist")))?;
        tender.apply_plan(&plan, Utc::now())?;

        let decision = plan
            .into_decision()
            .map(|draft| append_locked(&mut state, tender_id, draft));
        state.tenders.insert(tender_id, tender.clone());

        Ok(CommittedTransition { tender, decision })
    }
}

#[async_trait]
impl DecisionLogRepository for FakeTenderStore {
    async fn append_decision(
        &self,
        tender_id: TenderId,
        draft: DecisionDraft,
    ) -> AppResult<DecisionId> {
        let mut state = self.state.lock().await;
        Ok(append_locked(&mut state, tender_id, draft).id())
    }

    async fn list_decisions(&self, tender_id: TenderId) -> AppResult<Vec<Decision>> {
        let state = self.state.lock().await;
        Ok(state
            .decisions
            .iter()
            .rev()
            .filter(|decision| decision.tender_id() == tender_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) events: Mutex<Vec<(NotificationEvent, Value)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: NotificationEvent, payload: Value) -> AppResult<()> {
        self.events.lock().await.push((event, payload));
        Ok(())
    }
}

impl RecordingNotifier {
    /// Waits for background deliveries until `count` events arrived.
    pub(crate) async fn recorded(&self, count: usize) -> Vec<(NotificationEvent, Value)> {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(500);
        loop {
            let events = self.events.lock().await.clone();
            if events.len() >= count || tokio::time::Instant::now() >= deadline {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

pub(crate) struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _event: NotificationEvent, _payload: Value) -> AppResult<()> {
        Err(AppError::Dependency("mail relay unreachable".to_owned()))
    }
}

/// Notifier that stalls like an unresponsive webhook before failing.
pub(crate) struct StallingNotifier {
    pub(crate) delay: Duration,
}

#[async_trait]
impl Notifier for StallingNotifier {
    async fn notify(&self, _event: NotificationEvent, _payload: Value) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::Dependency("webhook timed out".to_owned()))
    }
}

pub(crate) fn profile(role: Role) -> Profile {
    Profile::new(ProfileId::new(), "tenders@bouw.nl", "Sanne Bakker", role)
        .unwrap_or_else(|_| unreachable!())
}

pub(crate) fn authorizer(audit_repository: Arc<FakeAuditRepository>) -> Authorizer {
    Authorizer::new(Arc::new(PermissionTable::portal_defaults()), audit_repository)
}

pub(crate) fn details(title: &str) -> TenderDetails {
    TenderDetails {
        title: title.to_owned(),
        buyer: "Provincie Gelderland".to_owned(),
        estimate_cents: Some(125_000_000),
        deadline: None,
        source: "TenderNed".to_owned(),
        match_score: 82,
        tags: ["bruggen".to_owned()].into_iter().collect(),
    }
}

pub(crate) fn tender_in(status: TenderStatus) -> Tender {
    let now = Utc::now();
    Tender::restore(
        TenderId::new(),
        details("Renovatie brug N325"),
        status,
        GoNoGoChecklist::new(),
        now,
        now,
    )
    .unwrap_or_else(|_| unreachable!())
}
