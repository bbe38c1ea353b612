mod access;
mod common;
mod tenders;

pub use access::{AccessibleRoutesResponse, RouteAccessQuery, RouteAccessResponse};
pub use common::{HealthDependencyStatus, HealthResponse, ProfileResponse};
pub use tenders::{
    ChecklistEntryRequest, ChecklistItemResponse, DecisionResponse, IngestTenderRequest,
    SaveChecklistRequest, SaveChecklistResponse, TenderListQueryParams, TenderResponse,
    TransitionTenderRequest, TransitionTenderResponse,
};
