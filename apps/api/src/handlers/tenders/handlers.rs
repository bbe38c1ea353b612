use super::*;

pub async fn list_tenders_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Query(query): Query<TenderListQueryParams>,
) -> ApiResult<Json<Vec<TenderResponse>>> {
    let tenders = state
        .tender_service
        .list_tenders(&profile, TenderListQuery::try_from(query)?)
        .await?
        .into_iter()
        .map(TenderResponse::from)
        .collect();

    Ok(Json(tenders))
}

pub async fn ingest_tender_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Json(payload): Json<IngestTenderRequest>,
) -> ApiResult<(StatusCode, Json<TenderResponse>)> {
    let tender = state
        .tender_service
        .ingest_tender(&profile, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(TenderResponse::from(tender))))
}

pub async fn get_tender_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Path(tender_id): Path<Uuid>,
) -> ApiResult<Json<TenderResponse>> {
    let tender = state
        .tender_service
        .get_tender(&profile, TenderId::from_uuid(tender_id))
        .await?;

    Ok(Json(TenderResponse::from(tender)))
}

pub async fn transition_tender_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Path(tender_id): Path<Uuid>,
    Json(payload): Json<TransitionTenderRequest>,
) -> ApiResult<Json<TransitionTenderResponse>> {
    let outcome = state
        .tender_service
        .transition_tender(
            &profile,
            TenderId::from_uuid(tender_id),
            TransitionTenderInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(TransitionTenderResponse::from(outcome)))
}

pub async fn save_checklist_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Path(tender_id): Path<Uuid>,
    Json(payload): Json<SaveChecklistRequest>,
) -> ApiResult<Json<SaveChecklistResponse>> {
    let outcome = state
        .tender_service
        .save_checklist(
            &profile,
            TenderId::from_uuid(tender_id),
            GoNoGoChecklist::try_from(payload)?,
        )
        .await?;

    Ok(Json(SaveChecklistResponse::from(outcome)))
}
