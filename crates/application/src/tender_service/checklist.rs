use super::*;

impl TenderService {
    /// Saves Go/No-Go checklist entries for the open review cycle.
    ///
    /// Entries are merged into the stored checklist. Saving on a `new`
    /// tender starts the review by moving it to `analyzing`.
    pub async fn save_checklist(
        &self,
        actor: &Profile,
        tender_id: TenderId,
        update: GoNoGoChecklist,
    ) -> AppResult<ChecklistOutcome> {
        self.authorizer
            .require_action(actor, Action::TendersWrite)
            .await?;

        let tender = self.load_tender(tender_id).await?;
        let plan = plan_checklist_update(&tender, &update)?;
        let from = plan.from();
        let started_review = plan.changes_status();

        let CommittedTransition { tender, .. } =
            self.repository.commit_transition(tender_id, plan).await?;
        let unchecked_items = tender.checklist().unchecked_items();

        info!(
            tender_id = %tender_id,
            profile_id = %actor.id(),
            status = tender.status().as_str(),
            unchecked = unchecked_items.len(),
            "tender checklist saved"
        );

        append_audit_event_best_effort(
            self.audit_repository.as_ref(),
            AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::TenderChecklistSaved,
                resource_type: "tender".to_owned(),
                resource_id: tender_id.to_string(),
                detail: Some(format!(
                    "{} of {} checklist item(s) checked",
                    tender.checklist().items().len() - unchecked_items.len(),
                    tender.checklist().items().len()
                )),
            },
        )
        .await;

        if started_review {
            self.dispatch_notification(
                NotificationEvent::TenderStatusChanged,
                notifications::status_payload(&tender, from, actor),
            );
        }

        Ok(ChecklistOutcome {
            tender,
            unchecked_items,
        })
    }
}
