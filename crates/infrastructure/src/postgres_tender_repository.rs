use std::collections::HashMap;

use async_trait::async_trait;
use bouwdesk_application::{CommittedTransition, TenderListQuery, TenderRepository};
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{
    ChecklistEntry, ChecklistItem, GoNoGoChecklist, Tender, TenderDetails, TenderId, TenderStatus,
    TransitionPlan,
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

mod decisions;

/// PostgreSQL-backed tender and decision log repository.
#[derive(Clone)]
pub struct PostgresTenderRepository {
    pool: PgPool,
}

impl PostgresTenderRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenderRow {
    id: Uuid,
    title: String,
    buyer: String,
    estimate_cents: Option<i64>,
    deadline: Option<DateTime<Utc>>,
    source: String,
    match_score: i16,
    tags: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ChecklistRow {
    tender_id: Uuid,
    item: String,
    checked: bool,
    notes: String,
}

const TENDER_COLUMNS: &str = r#"
    id,
    title,
    buyer,
    estimate_cents,
    deadline,
    source,
    match_score,
    tags,
    status,
    created_at,
    updated_at
"#;

fn dependency_error(context: &str, error: sqlx::Error) -> AppError {
    AppError::Dependency(format!("{context}: {error}"))
}

fn tender_from_row(row: TenderRow, checklist: GoNoGoChecklist) -> AppResult<Tender> {
    let status = TenderStatus::from_transport(row.status.as_str()).map_err(|error| {
        AppError::Internal(format!("tender '{}' has corrupt status: {error}", row.id))
    })?;
    let match_score = u8::try_from(row.match_score).map_err(|_| {
        AppError::Internal(format!(
            "tender '{}' has out-of-range match score {}",
            row.id, row.match_score
        ))
    })?;

    Tender::restore(
        TenderId::from_uuid(row.id),
        TenderDetails {
            title: row.title,
            buyer: row.buyer,
            estimate_cents: row.estimate_cents,
            deadline: row.deadline,
            source: row.source,
            match_score,
            tags: row.tags.into_iter().collect(),
        },
        status,
        checklist,
        row.created_at,
        row.updated_at,
    )
    .map_err(|error| AppError::Internal(format!("tender '{}' is corrupt: {error}", row.id)))
}

async fn load_checklists(
    connection: &mut PgConnection,
    tender_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, GoNoGoChecklist>> {
    let rows = sqlx::query_as::<_, ChecklistRow>(
        r#"
        SELECT tender_id, item, checked, notes
        FROM tender_checklist_items
        WHERE tender_id = ANY($1)
        "#,
    )
    .bind(tender_ids)
    .fetch_all(&mut *connection)
    .await
    .map_err(|error| dependency_error("failed to load tender checklists", error))?;

    let mut checklists: HashMap<Uuid, GoNoGoChecklist> = HashMap::new();
    for row in rows {
        let item = row.item.parse::<ChecklistItem>().map_err(|error| {
            AppError::Internal(format!(
                "tender '{}' has corrupt checklist item: {error}",
                row.tender_id
            ))
        })?;
        let entry = ChecklistEntry::new(row.checked, row.notes)?;
        checklists.entry(row.tender_id).or_default().set(item, entry);
    }

    Ok(checklists)
}

async fn load_tender(
    connection: &mut PgConnection,
    tender_id: TenderId,
) -> AppResult<Option<Tender>> {
    let row = sqlx::query_as::<_, TenderRow>(&format!(
        "SELECT {TENDER_COLUMNS} FROM tenders WHERE id = $1"
    ))
    .bind(tender_id.as_uuid())
    .fetch_optional(&mut *connection)
    .await
    .map_err(|error| dependency_error("failed to load tender", error))?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut checklists = load_checklists(connection, &[row.id]).await?;
    let checklist = checklists.remove(&row.id).unwrap_or_default();
    tender_from_row(row, checklist).map(Some)
}

async fn write_checklist(
    connection: &mut PgConnection,
    tender_id: TenderId,
    checklist: &GoNoGoChecklist,
) -> AppResult<()> {
    for (item, entry) in checklist.written_entries() {
        sqlx::query(
            r#"
            INSERT INTO tender_checklist_items (tender_id, item, checked, notes, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (tender_id, item) DO UPDATE
            SET checked = EXCLUDED.checked,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(tender_id.as_uuid())
        .bind(item.as_str())
        .bind(entry.checked)
        .bind(entry.notes.as_str())
        .execute(&mut *connection)
        .await
        .map_err(|error| dependency_error("failed to store tender checklist", error))?;
    }

    Ok(())
}

#[async_trait]
impl TenderRepository for PostgresTenderRepository {
    async fn insert_tender(&self, tender: Tender) -> AppResult<()> {
        let details = tender.details();
        let tags: Vec<String> = details.tags.iter().cloned().collect();

        let result = sqlx::query(
            r#"
            INSERT INTO tenders (
                id,
                title,
                buyer,
                estimate_cents,
                deadline,
                source,
                match_score,
                tags,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(tender.id().as_uuid())
        .bind(details.title.as_str())
        .bind(details.buyer.as_str())
        .bind(details.estimate_cents)
        .bind(details.deadline)
        .bind(details.source.as_str())
        .bind(i16::from(details.match_score))
        .bind(tags)
        .bind(tender.status().as_str())
        .bind(tender.created_at())
        .bind(tender.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "tender '{}' already exists",
                        tender.id()
                    )));
                }

                Err(dependency_error("failed to insert tender", error))
            }
        }
    }

    async fn find_tender(&self, tender_id: TenderId) -> AppResult<Option<Tender>> {
        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|error| dependency_error("failed to acquire connection", error))?;
        load_tender(&mut connection, tender_id).await
    }

    async fn list_tenders(&self, query: TenderListQuery) -> AppResult<Vec<Tender>> {
        let limit = i64::try_from(query.limit)
            .map_err(|_| AppError::Validation("tender page size is too large".to_owned()))?;
        let offset = i64::try_from(query.offset)
            .map_err(|_| AppError::Validation("tender page offset is too large".to_owned()))?;

        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|error| dependency_error("failed to acquire connection", error))?;

        let rows = sqlx::query_as::<_, TenderRow>(&format!(
            r#"
            SELECT {TENDER_COLUMNS}
            FROM tenders
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY updated_at DESC, id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(query.status.map(|status| status.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *connection)
        .await
        .map_err(|error| dependency_error("failed to list tenders", error))?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut checklists = load_checklists(&mut connection, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let checklist = checklists.remove(&row.id).unwrap_or_default();
                tender_from_row(row, checklist)
            })
            .collect()
    }

    async fn commit_transition(
        &self,
        tender_id: TenderId,
        plan: TransitionPlan,
    ) -> AppResult<CommittedTransition> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            dependency_error("failed to start tender transition transaction", error)
        })?;

        let swapped = sqlx::query(
            r#"
            UPDATE tenders
            SET status = $3, updated_at = now()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(tender_id.as_uuid())
        .bind(plan.from().as_str())
        .bind(plan.to().as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| dependency_error("failed to update tender status", error))?;

        if swapped.rows_affected() == 0 {
            let current: Option<String> =
                sqlx::query_scalar("SELECT status FROM tenders WHERE id = $1")
                    .bind(tender_id.as_uuid())
                    .fetch_optional(&mut *transaction)
                    .await
                    .map_err(|error| dependency_error("failed to re-read tender", error))?;

            return Err(match current {
                None => AppError::NotFound(format!("tender '{tender_id}' does not exist")),
                Some(current) => AppError::Conflict(format!(
                    "tender '{tender_id}' moved from '{}' to '{current}' concurrently; \
                     re-fetch and retry",
                    plan.from()
                )),
            });
        }

        if let Some(checklist) = plan.checklist() {
            write_checklist(&mut transaction, tender_id, checklist).await?;
        }

        let decision = match plan.into_decision() {
            Some(draft) => {
                Some(decisions::insert_decision(&mut transaction, tender_id, draft).await?)
            }
            None => None,
        };

        let tender = load_tender(&mut transaction, tender_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tender '{tender_id}' does not exist")))?;

        transaction.commit().await.map_err(|error| {
            dependency_error("failed to commit tender transition transaction", error)
        })?;

        debug!(
            tender_id = %tender_id,
            status = tender.status().as_str(),
            "tender transition stored"
        );
        Ok(CommittedTransition { tender, decision })
    }
}
