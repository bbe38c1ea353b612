use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use bouwdesk_application::{TenderListQuery, TransitionTenderInput};
use bouwdesk_domain::{GoNoGoChecklist, Profile, TenderId};
use uuid::Uuid;

use crate::dto::{
    DecisionResponse, IngestTenderRequest, SaveChecklistRequest, SaveChecklistResponse,
    TenderListQueryParams, TenderResponse, TransitionTenderRequest, TransitionTenderResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod decisions;
mod handlers;

pub use decisions::{latest_decision_handler, list_decisions_handler};
pub use handlers::{
    get_tender_handler, ingest_tender_handler, list_tenders_handler, save_checklist_handler,
    transition_tender_handler,
};

#[cfg(test)]
mod tests;
