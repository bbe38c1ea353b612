use super::*;

impl TenderService {
    /// Ingests a new tender opportunity in status `new`.
    pub async fn ingest_tender(
        &self,
        actor: &Profile,
        details: TenderDetails,
    ) -> AppResult<Tender> {
        self.authorizer
            .require_action(actor, Action::TendersWrite)
            .await?;

        let tender = Tender::ingest(TenderId::new(), details, Utc::now())?;
        self.repository.insert_tender(tender.clone()).await?;

        info!(
            tender_id = %tender.id(),
            profile_id = %actor.id(),
            source = tender.details().source.as_str(),
            "tender ingested"
        );

        append_audit_event_best_effort(
            self.audit_repository.as_ref(),
            AuditEvent {
                subject: actor.id().to_string(),
                action: AuditAction::TenderIngested,
                resource_type: "tender".to_owned(),
                resource_id: tender.id().to_string(),
                detail: Some(format!(
                    "ingested '{}' for buyer '{}'",
                    tender.details().title,
                    tender.details().buyer
                )),
            },
        )
        .await;

        Ok(tender)
    }

    /// Lists tenders, most recently updated first.
    ///
    /// The page size is clamped to `1..=TENDER_LIST_LIMIT_MAX`.
    pub async fn list_tenders(
        &self,
        actor: &Profile,
        query: TenderListQuery,
    ) -> AppResult<Vec<Tender>> {
        self.authorizer
            .require_action(actor, Action::TendersRead)
            .await?;

        let query = TenderListQuery {
            limit: query.limit.clamp(1, TENDER_LIST_LIMIT_MAX),
            ..query
        };
        self.repository.list_tenders(query).await
    }

    /// Returns one tender.
    pub async fn get_tender(&self, actor: &Profile, tender_id: TenderId) -> AppResult<Tender> {
        self.authorizer
            .require_action(actor, Action::TendersRead)
            .await?;
        self.load_tender(tender_id).await
    }
}
