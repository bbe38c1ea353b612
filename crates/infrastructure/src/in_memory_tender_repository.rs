use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use bouwdesk_application::{
    CommittedTransition, DecisionLogRepository, TenderListQuery, TenderRepository,
};
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{Decision, DecisionDraft, DecisionId, Tender, TenderId, TransitionPlan};
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct TenderStore {
    tenders: HashMap<TenderId, Tender>,
    decisions: Vec<(u64, Decision)>,
    next_seq: u64,
}

impl TenderStore {
    fn append(&mut self, tender_id: TenderId, draft: DecisionDraft) -> Decision {
        self.next_seq += 1;
        let decision = draft.into_decision(DecisionId::new(), tender_id, Utc::now());
        self.decisions.push((self.next_seq, decision.clone()));
        decision
    }
}

/// In-memory tender and decision log repository.
///
/// Tenders and decisions live behind one lock so a transition and its
/// decision are committed together.
#[derive(Debug, Default)]
pub struct InMemoryTenderRepository {
    store: RwLock<TenderStore>,
}

impl InMemoryTenderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenderRepository for InMemoryTenderRepository {
    async fn insert_tender(&self, tender: Tender) -> AppResult<()> {
        let mut store = self.store.write().await;
        if store.tenders.contains_key(&tender.id()) {
            return Err(AppError::Conflict(format!(
                "tender '{}' already exists",
                tender.id()
            )));
        }

        store.tenders.insert(tender.id(), tender);
        Ok(())
    }

    async fn find_tender(&self, tender_id: TenderId) -> AppResult<Option<Tender>> {
        Ok(self.store.read().await.tenders.get(&tender_id).cloned())
    }

    async fn list_tenders(&self, query: TenderListQuery) -> AppResult<Vec<Tender>> {
        let store = self.store.read().await;
        let mut tenders: Vec<Tender> = store
            .tenders
            .values()
            .filter(|tender| query.status.is_none_or(|status| tender.status() == status))
            .cloned()
            .collect();
        tenders.sort_by_key(|tender| (Reverse(tender.updated_at()), tender.id()));

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
        let mut store = self.store.write().await;
        let mut tender = store
            .tenders
            .get(&tender_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("tender '{tender_id}' does not exist")))?;

        tender.apply_plan(&plan, Utc::now())?;
        let decision = plan
            .into_decision()
            .map(|draft| store.append(tender_id, draft));
        store.tenders.insert(tender_id, tender.clone());

        Ok(CommittedTransition { tender, decision })
    }
}

#[async_trait]
impl DecisionLogRepository for InMemoryTenderRepository {
    async fn append_decision(
        &self,
        tender_id: TenderId,
        draft: DecisionDraft,
    ) -> AppResult<DecisionId> {
        let mut store = self.store.write().await;
        if !store.tenders.contains_key(&tender_id) {
            return Err(AppError::NotFound(format!(
                "tender '{tender_id}' does not exist"
            )));
        }

        Ok(store.append(tender_id, draft).id())
    }

    async fn list_decisions(&self, tender_id: TenderId) -> AppResult<Vec<Decision>> {
        let store = self.store.read().await;
        let mut decisions: Vec<&(u64, Decision)> = store
            .decisions
            .iter()
            .filter(|(_, decision)| decision.tender_id() == tender_id)
            .collect();
        decisions.sort_by_key(|(seq, decision)| Reverse((decision.decided_at(), *seq)));

        Ok(decisions
            .into_iter()
            .map(|(_, decision)| decision.clone())
            .collect())
    }
}
