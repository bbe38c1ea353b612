use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query parameters of the tender list.
#[derive(Debug, Default, Deserialize)]
pub struct TenderListQueryParams {
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Incoming payload for tender ingestion.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ingest-tender-request.ts"
)]
pub struct IngestTenderRequest {
    pub title: String,
    pub buyer: String,
    /// Estimated contract value in euro cents.
    #[ts(type = "number | null")]
    pub estimate_cents: Option<i64>,
    /// RFC 3339 submission deadline.
    #[ts(type = "string | null")]
    pub deadline: Option<DateTime<Utc>>,
    pub source: String,
    #[serde(default)]
    pub match_score: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One checklist entry as sent by the portal.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/checklist-entry-request.ts"
)]
pub struct ChecklistEntryRequest {
    pub checked: bool,
    #[serde(default)]
    pub notes: String,
}

/// Incoming payload for a tender status change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/transition-tender-request.ts"
)]
pub struct TransitionTenderRequest {
    pub status: String,
    pub decision_reason: Option<String>,
    pub decision_by: Option<String>,
    /// Checklist entries keyed by item id (e.g. `capacity`).
    pub go_no_go_checklist: Option<BTreeMap<String, ChecklistEntryRequest>>,
}

/// Incoming payload for a checklist save.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-checklist-request.ts"
)]
pub struct SaveChecklistRequest {
    pub go_no_go_checklist: BTreeMap<String, ChecklistEntryRequest>,
}

/// API representation of one checklist item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/checklist-item-response.ts"
)]
pub struct ChecklistItemResponse {
    pub item: String,
    pub checked: bool,
    pub notes: String,
}

/// API representation of a tender.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/tender-response.ts"
)]
pub struct TenderResponse {
    pub tender_id: String,
    pub title: String,
    pub buyer: String,
    #[ts(type = "number | null")]
    pub estimate_cents: Option<i64>,
    pub deadline: Option<String>,
    pub source: String,
    pub match_score: u8,
    pub tags: Vec<String>,
    pub status: String,
    pub checklist: Vec<ChecklistItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation of a Go/No-Go decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/decision-response.ts"
)]
pub struct DecisionResponse {
    pub decision_id: String,
    pub tender_id: String,
    pub decision_type: String,
    pub reason: String,
    pub decided_by: String,
    pub decided_by_name: String,
    pub decided_at: String,
    pub summary: String,
}

/// Result of a tender status change.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/transition-tender-response.ts"
)]
pub struct TransitionTenderResponse {
    pub tender: TenderResponse,
    pub decision: Option<DecisionResponse>,
    /// Checklist items still unchecked; advisory only.
    pub unchecked_items: Vec<String>,
}

/// Result of a checklist save.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-checklist-response.ts"
)]
pub struct SaveChecklistResponse {
    pub tender: TenderResponse,
    pub unchecked_items: Vec<String>,
}
