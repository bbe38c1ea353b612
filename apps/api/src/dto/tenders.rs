mod conversions;
mod types;

pub use types::{
    ChecklistEntryRequest, ChecklistItemResponse, DecisionResponse, IngestTenderRequest,
    SaveChecklistRequest, SaveChecklistResponse, TenderListQueryParams, TenderResponse,
    TransitionTenderRequest, TransitionTenderResponse,
};
