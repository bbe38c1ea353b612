use bouwdesk_application::DecisionLogRepository;
use bouwdesk_domain::{Decision, DecisionActor, DecisionDraft, DecisionId, DecisionType, ProfileId};

use super::*;

#[derive(Debug, FromRow)]
struct DecisionRow {
    id: Uuid,
    tender_id: Uuid,
    decision_type: String,
    reason: String,
    decided_by: Uuid,
    decided_by_name: String,
    decided_at: DateTime<Utc>,
}

impl DecisionRow {
    fn into_decision(self) -> AppResult<Decision> {
        let decision_type = self.decision_type.parse::<DecisionType>().map_err(|error| {
            AppError::Internal(format!("decision '{}' has corrupt type: {error}", self.id))
        })?;

        Decision::restore(
            DecisionId::from_uuid(self.id),
            TenderId::from_uuid(self.tender_id),
            decision_type,
            self.reason,
            DecisionActor {
                profile_id: ProfileId::from_uuid(self.decided_by),
                display_name: self.decided_by_name,
            },
            self.decided_at,
        )
    }
}

/// Inserts one decision; `decided_at` comes from the database clock.
pub(super) async fn insert_decision(
    connection: &mut PgConnection,
    tender_id: TenderId,
    draft: DecisionDraft,
) -> AppResult<Decision> {
    let decision_id = DecisionId::new();
    let result = sqlx::query_scalar::<_, DateTime<Utc>>(
        r#"
        INSERT INTO tender_decisions (
            id,
            tender_id,
            decision_type,
            reason,
            decided_by,
            decided_by_name
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING decided_at
        "#,
    )
    .bind(decision_id.as_uuid())
    .bind(tender_id.as_uuid())
    .bind(draft.decision_type().as_str())
    .bind(draft.reason())
    .bind(draft.decided_by().profile_id.as_uuid())
    .bind(draft.decided_by().display_name.as_str())
    .fetch_one(&mut *connection)
    .await;

    match result {
        Ok(decided_at) => Ok(draft.into_decision(decision_id, tender_id, decided_at)),
        Err(error) => {
            if let sqlx::Error::Database(database_error) = &error
                && database_error.code().as_deref() == Some("23503")
            {
                return Err(AppError::NotFound(format!(
                    "tender '{tender_id}' does not exist"
                )));
            }

            Err(dependency_error("failed to append tender decision", error))
        }
    }
}

#[async_trait]
impl DecisionLogRepository for PostgresTenderRepository {
    async fn append_decision(
        &self,
        tender_id: TenderId,
        draft: DecisionDraft,
    ) -> AppResult<DecisionId> {
        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|error| dependency_error("failed to acquire connection", error))?;

        insert_decision(&mut connection, tender_id, draft)
            .await
            .map(|decision| decision.id())
    }

    async fn list_decisions(&self, tender_id: TenderId) -> AppResult<Vec<Decision>> {
        let rows = sqlx::query_as::<_, DecisionRow>(
            r#"
            SELECT
                id,
                tender_id,
                decision_type,
                reason,
                decided_by,
                decided_by_name,
                decided_at
            FROM tender_decisions
            WHERE tender_id = $1
            ORDER BY decided_at DESC, seq DESC
            "#,
        )
        .bind(tender_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| dependency_error("failed to list tender decisions", error))?;

        rows.into_iter().map(DecisionRow::into_decision).collect()
    }
}
