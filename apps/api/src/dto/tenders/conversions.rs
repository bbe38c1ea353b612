use std::collections::BTreeMap;

use bouwdesk_application::{
    ChecklistOutcome, TenderListQuery, TransitionOutcome, TransitionTenderInput,
};
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{
    ChecklistEntry, ChecklistItem, Decision, GoNoGoChecklist, ProfileId, Tender, TenderDetails,
    TenderStatus,
};

use super::types::{
    ChecklistEntryRequest, ChecklistItemResponse, DecisionResponse, IngestTenderRequest,
    SaveChecklistRequest, SaveChecklistResponse, TenderListQueryParams, TenderResponse,
    TransitionTenderRequest, TransitionTenderResponse,
};

fn checklist_from_request(
    entries: BTreeMap<String, ChecklistEntryRequest>,
) -> AppResult<GoNoGoChecklist> {
    let entries = entries
        .into_iter()
        .map(|(item, entry)| -> AppResult<(String, ChecklistEntry)> {
            Ok((item, ChecklistEntry::new(entry.checked, entry.notes)?))
        })
        .collect::<AppResult<Vec<_>>>()?;

    GoNoGoChecklist::from_entries(entries)
}

fn item_names(items: Vec<ChecklistItem>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.as_str().to_owned())
        .collect()
}

impl TryFrom<TenderListQueryParams> for TenderListQuery {
    type Error = AppError;

    fn try_from(value: TenderListQueryParams) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        Ok(Self {
            status: value
                .status
                .as_deref()
                .map(TenderStatus::from_transport)
                .transpose()?,
            limit: value.limit.unwrap_or(defaults.limit),
            offset: value.offset.unwrap_or(defaults.offset),
        })
    }
}

impl From<IngestTenderRequest> for TenderDetails {
    fn from(value: IngestTenderRequest) -> Self {
        Self {
            title: value.title,
            buyer: value.buyer,
            estimate_cents: value.estimate_cents,
            deadline: value.deadline,
            source: value.source,
            match_score: value.match_score,
            tags: value.tags.into_iter().collect(),
        }
    }
}

impl TryFrom<TransitionTenderRequest> for TransitionTenderInput {
    type Error = AppError;

    fn try_from(value: TransitionTenderRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: TenderStatus::from_transport(value.status.as_str())?,
            decision_reason: value.decision_reason,
            decision_by: value
                .decision_by
                .as_deref()
                .map(ProfileId::parse)
                .transpose()?,
            checklist: value
                .go_no_go_checklist
                .map(checklist_from_request)
                .transpose()?,
        })
    }
}

impl TryFrom<SaveChecklistRequest> for GoNoGoChecklist {
    type Error = AppError;

    fn try_from(value: SaveChecklistRequest) -> Result<Self, Self::Error> {
        checklist_from_request(value.go_no_go_checklist)
    }
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        let checklist = tender
            .checklist()
            .items()
            .into_iter()
            .map(|(item, entry)| ChecklistItemResponse {
                item: item.as_str().to_owned(),
                checked: entry.checked,
                notes: entry.notes,
            })
            .collect();
        let details = tender.details();

        Self {
            tender_id: tender.id().to_string(),
            title: details.title.clone(),
            buyer: details.buyer.clone(),
            estimate_cents: details.estimate_cents,
            deadline: details.deadline.map(|deadline| deadline.to_rfc3339()),
            source: details.source.clone(),
            match_score: details.match_score,
            tags: details.tags.iter().cloned().collect(),
            status: tender.status().as_str().to_owned(),
            checklist,
            created_at: tender.created_at().to_rfc3339(),
            updated_at: tender.updated_at().to_rfc3339(),
        }
    }
}

impl From<Decision> for DecisionResponse {
    fn from(decision: Decision) -> Self {
        Self {
            decision_id: decision.id().to_string(),
            tender_id: decision.tender_id().to_string(),
            decision_type: decision.decision_type().as_str().to_owned(),
            reason: decision.reason().to_owned(),
            decided_by: decision.decided_by().profile_id.to_string(),
            decided_by_name: decision.decided_by().display_name.clone(),
            decided_at: decision.decided_at().to_rfc3339(),
            summary: decision.summary(),
        }
    }
}

impl From<TransitionOutcome> for TransitionTenderResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        Self {
            tender: TenderResponse::from(outcome.tender),
            decision: outcome.decision.map(DecisionResponse::from),
            unchecked_items: item_names(outcome.unchecked_items),
        }
    }
}

impl From<ChecklistOutcome> for SaveChecklistResponse {
    fn from(outcome: ChecklistOutcome) -> Self {
        Self {
            tender: TenderResponse::from(outcome.tender),
            unchecked_items: item_names(outcome.unchecked_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use bouwdesk_application::TransitionTenderInput;
    use bouwdesk_core::AppError;
    use bouwdesk_domain::{ChecklistItem, TenderStatus};

    use crate::dto::{ChecklistEntryRequest, TransitionTenderRequest};

    fn entry(checked: bool, notes: &str) -> ChecklistEntryRequest {
        ChecklistEntryRequest {
            checked,
            notes: notes.to_owned(),
        }
    }

    #[test]
    fn transition_request_parses_status_and_checklist() {
        let input = TransitionTenderInput::try_from(TransitionTenderRequest {
            status: "go".to_owned(),
            decision_reason: Some("past in de planning".to_owned()),
            decision_by: None,
            go_no_go_checklist: Some(BTreeMap::from([(
                "capacity".to_owned(),
                entry(true, "ploeg Noord vrij vanaf Q3"),
            )])),
        })
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(input.status, TenderStatus::Go);
        let checklist = input.checklist.unwrap_or_default();
        assert_eq!(
            checklist
                .get(ChecklistItem::Capacity)
                .map(|entry| entry.checked),
            Some(true)
        );
    }

    #[test]
    fn unknown_status_and_checklist_items_are_validation_errors() {
        let unknown_status = TransitionTenderInput::try_from(TransitionTenderRequest {
            status: "maybe".to_owned(),
            decision_reason: None,
            decision_by: None,
            go_no_go_checklist: None,
        });
        assert!(matches!(unknown_status, Err(AppError::Validation(_))));

        let unknown_item = TransitionTenderInput::try_from(TransitionTenderRequest {
            status: "analyzing".to_owned(),
            decision_reason: None,
            decision_by: None,
            go_no_go_checklist: Some(BTreeMap::from([(
                "weather".to_owned(),
                entry(false, ""),
            )])),
        });
        assert!(matches!(unknown_item, Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_decision_by_is_rejected() {
        let result = TransitionTenderInput::try_from(TransitionTenderRequest {
            status: "no_go".to_owned(),
            decision_reason: Some("te laat".to_owned()),
            decision_by: Some("not-a-uuid".to_owned()),
            go_no_go_checklist: None,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
