use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bouwdesk_core::AppError;
use bouwdesk_domain::{Profile, Role};
use uuid::Uuid;

use crate::dto::{
    ChecklistEntryRequest, IngestTenderRequest, SaveChecklistRequest, TenderListQueryParams,
    TransitionTenderRequest,
};
use crate::state::AppState;
use crate::test_support::{profile, test_state};

use super::{
    get_tender_handler, ingest_tender_handler, latest_decision_handler, list_decisions_handler,
    list_tenders_handler, save_checklist_handler, transition_tender_handler,
};

fn ingest_request(title: &str) -> IngestTenderRequest {
    IngestTenderRequest {
        title: title.to_owned(),
        buyer: "Gemeente Zwolle".to_owned(),
        estimate_cents: Some(215_000_000),
        deadline: None,
        source: "TenderNed".to_owned(),
        match_score: 78,
        tags: vec!["Bruggen".to_owned(), "beton".to_owned()],
    }
}

fn transition(status: &str, reason: Option<&str>) -> TransitionTenderRequest {
    TransitionTenderRequest {
        status: status.to_owned(),
        decision_reason: reason.map(ToOwned::to_owned),
        decision_by: None,
        go_no_go_checklist: None,
    }
}

async fn ingested(state: &AppState, actor: &Profile) -> Uuid {
    let (status, Json(tender)) = ingest_tender_handler(
        State(state.clone()),
        Extension(actor.clone()),
        Json(ingest_request("Renovatie fietsbrug Zwartewater")),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tender.status, "new");
    assert_eq!(tender.tags, vec!["beton".to_owned(), "bruggen".to_owned()]);
    Uuid::parse_str(tender.tender_id.as_str()).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn go_decision_is_returned_and_logged() {
    let sales = profile(Role::Sales);
    let state = test_state(std::slice::from_ref(&sales)).await;
    let tender_id = ingested(&state, &sales).await;

    let Json(outcome) = transition_tender_handler(
        State(state.clone()),
        Extension(sales.clone()),
        Path(tender_id),
        Json(TransitionTenderRequest {
            decision_by: Some(sales.id().to_string()),
            go_no_go_checklist: Some(BTreeMap::from([(
                "capacity".to_owned(),
                ChecklistEntryRequest {
                    checked: true,
                    notes: "uitvoering door ploeg Oost".to_owned(),
                },
            )])),
            ..transition("go", Some("sterke referenties in de regio"))
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.tender.status, "go");
    let decision = outcome.decision.unwrap_or_else(|| unreachable!());
    assert_eq!(decision.decision_type, "go");
    assert!(decision.summary.starts_with("GO by Test SALES at "));
    assert_eq!(decision.decided_by, sales.id().to_string());
    assert!(!outcome.unchecked_items.contains(&"capacity".to_owned()));
    assert!(outcome.unchecked_items.contains(&"margin".to_owned()));

    let Json(decisions) =
        list_decisions_handler(State(state.clone()), Extension(sales.clone()), Path(tender_id))
            .await
            .unwrap_or_else(|_| unreachable!());
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].reason, "sterke referenties in de regio");

    let Json(latest) = latest_decision_handler(State(state), Extension(sales), Path(tender_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        latest.map(|decision| decision.decision_id),
        Some(decisions[0].decision_id.clone())
    );
}

#[tokio::test]
async fn illegal_transition_maps_to_unprocessable_entity() {
    let sales = profile(Role::Sales);
    let state = test_state(std::slice::from_ref(&sales)).await;
    let tender_id = ingested(&state, &sales).await;

    let result = transition_tender_handler(
        State(state),
        Extension(sales),
        Path(tender_id),
        Json(transition("won", None)),
    )
    .await;

    let Err(error) = result else {
        unreachable!();
    };
    assert!(matches!(error.0, AppError::IllegalTransition { .. }));
    assert_eq!(
        error.into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn decision_without_reason_is_rejected() {
    let directie = profile(Role::Directie);
    let state = test_state(std::slice::from_ref(&directie)).await;
    let tender_id = ingested(&state, &directie).await;

    let result = transition_tender_handler(
        State(state),
        Extension(directie),
        Path(tender_id),
        Json(transition("no_go", Some("   "))),
    )
    .await;

    assert!(result.is_err_and(|error| matches!(error.0, AppError::IllegalTransition { .. })));
}

#[tokio::test]
async fn viewer_cannot_ingest_or_read_tenders() {
    let viewer = profile(Role::Viewer);
    let state = test_state(std::slice::from_ref(&viewer)).await;

    let ingest = ingest_tender_handler(
        State(state.clone()),
        Extension(viewer.clone()),
        Json(ingest_request("Onderhoud kademuren")),
    )
    .await;
    let Err(error) = ingest else {
        unreachable!();
    };
    assert_eq!(error.into_response().status(), StatusCode::FORBIDDEN);

    let list = list_tenders_handler(
        State(state),
        Extension(viewer),
        Query(TenderListQueryParams::default()),
    )
    .await;
    assert!(list.is_err_and(|error| matches!(error.0, AppError::Forbidden(_))));
}

#[tokio::test]
async fn checklist_save_starts_review_and_list_filters_by_status() {
    let admin = profile(Role::Admin);
    let state = test_state(std::slice::from_ref(&admin)).await;
    let reviewed = ingested(&state, &admin).await;
    let untouched = ingested(&state, &admin).await;

    let Json(saved) = save_checklist_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path(reviewed),
        Json(SaveChecklistRequest {
            go_no_go_checklist: BTreeMap::from([(
                "risk".to_owned(),
                ChecklistEntryRequest {
                    checked: false,
                    notes: "bodemonderzoek ontbreekt".to_owned(),
                },
            )]),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(saved.tender.status, "analyzing");
    assert_eq!(saved.unchecked_items.len(), 5);

    let Json(analyzing) = list_tenders_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Query(TenderListQueryParams {
            status: Some("analyzing".to_owned()),
            ..TenderListQueryParams::default()
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(analyzing.len(), 1);
    assert_eq!(analyzing[0].tender_id, reviewed.to_string());

    let Json(fetched) = get_tender_handler(State(state), Extension(admin), Path(untouched))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(fetched.status, "new");
    assert!(fetched.checklist.iter().all(|item| !item.checked));
}

#[tokio::test]
async fn unknown_tender_is_not_found() {
    let sales = profile(Role::Sales);
    let state = test_state(std::slice::from_ref(&sales)).await;

    let result = get_tender_handler(State(state), Extension(sales), Path(Uuid::new_v4())).await;

    let Err(error) = result else {
        unreachable!();
    };
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_status_filter_is_a_bad_request() {
    let sales = profile(Role::Sales);
    let state = test_state(std::slice::from_ref(&sales)).await;

    let result = list_tenders_handler(
        State(state),
        Extension(sales),
        Query(TenderListQueryParams {
            status: Some("archived".to_owned()),
            ..TenderListQueryParams::default()
        }),
    )
    .await;

    assert!(result.is_err_and(|error| matches!(error.0, AppError::Validation(_))));
}
