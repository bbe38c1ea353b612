use std::sync::Arc;

use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{Action, Decision, Profile, TenderId};

use crate::Authorizer;
use crate::tender_ports::{DecisionLogRepository, TenderRepository};

/// Read access to the append-only decision log.
///
/// Appends happen only inside committed tender transitions.
#[derive(Clone)]
pub struct DecisionLogService {
    authorizer: Authorizer,
    tender_repository: Arc<dyn TenderRepository>,
    decision_repository: Arc<dyn DecisionLogRepository>,
}

impl DecisionLogService {
    /// Creates a decision log service.
    #[must_use]
    pub fn new(
        authorizer: Authorizer,
        tender_repository: Arc<dyn TenderRepository>,
        decision_repository: Arc<dyn DecisionLogRepository>,
    ) -> Self {
        Self {
            authorizer,
            tender_repository,
            decision_repository,
        }
    }

    /// Lists decisions for one tender, newest first.
    pub async fn list_for(&self, actor: &Profile, tender_id: TenderId) -> AppResult<Vec<Decision>> {
        self.authorizer
            .require_action(actor, Action::TendersRead)
            .await?;

        if self
            .tender_repository
            .find_tender(tender_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "tender '{tender_id}' does not exist"
            )));
        }

        self.decision_repository.list_decisions(tender_id).await
    }

    /// Returns the most recent decision for one tender, if any.
    pub async fn latest_for(
        &self,
        actor: &Profile,
        tender_id: TenderId,
    ) -> AppResult<Option<Decision>> {
        Ok(self.list_for(actor, tender_id).await?.into_iter().next())
    }
}
