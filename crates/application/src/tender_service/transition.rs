use super::*;

impl TenderService {
    /// Moves a tender to a new status.
    ///
    /// Decision transitions (`go`, `no_go`) append exactly one decision in
    /// the same commit as the status change. The decider is always the
    /// caller; a differing `decision_by` is rejected. The commit is a
    /// compare-and-swap on the status the transition was computed from, so a
    /// concurrent change surfaces as `Conflict`.
    pub async fn transition_tender(
        &self,
        actor: &Profile,
        tender_id: TenderId,
        input: TransitionTenderInput,
    ) -> AppResult<TransitionOutcome> {
        self.authorizer
            .require_action(actor, Action::TendersWrite)
            .await?;

        if input
            .decision_by
            .is_some_and(|claimed| claimed != actor.id())
        {
            return Err(AppError::Forbidden(
                "decisions can only be recorded on behalf of the signed-in profile".to_owned(),
            ));
        }

        let tender = self.load_tender(tender_id).await?;
        let plan = plan_transition(
            &tender,
            input.status,
            input.decision_reason.as_deref(),
            input.checklist.as_ref(),
            DecisionActor::from(actor),
        )?;
        let from = plan.from();

        let CommittedTransition { tender, decision } =
            self.repository.commit_transition(tender_id, plan).await?;

        info!(
            tender_id = %tender_id,
            profile_id = %actor.id(),
            from = from.as_str(),
            to = tender.status().as_str(),
            decision_id = decision.as_ref().map(|decision| decision.id().to_string()),
            "tender transition committed"
        );

        append_audit_event_best_effort(
            self.audit_repository.as_ref(),
            AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::TenderTransitioned,
                resource_type: "tender".to_owned(),
                resource_id: tender_id.to_string(),
                detail: Some(match &decision {
                    Some(decision) => decision.summary(),
                    None => format!("moved from '{from}' to '{}'", tender.status()),
                }),
            },
        )
        .await;

        let (event, payload) = match &decision {
            Some(decision) => (
                NotificationEvent::TenderDecisionRecorded,
                notifications::decision_payload(&tender, from, decision),
            ),
            None => (
                NotificationEvent::TenderStatusChanged,
                notifications::status_payload(&tender, from, actor),
            ),
        };
        self.dispatch_notification(event, payload);

        Ok(TransitionOutcome {
            unchecked_items: tender.checklist().unchecked_items(),
            tender,
            decision,
        })
    }
}
