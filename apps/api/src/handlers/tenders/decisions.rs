use super::*;

pub async fn list_decisions_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Path(tender_id): Path<Uuid>,
) -> ApiResult<Json<Vec<DecisionResponse>>> {
    let decisions = state
        .decision_log_service
        .list_for(&profile, TenderId::from_uuid(tender_id))
        .await?
        .into_iter()
        .map(DecisionResponse::from)
        .collect();

    Ok(Json(decisions))
}

/// Returns the most recent decision, or `null` while the tender is undecided.
pub async fn latest_decision_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Path(tender_id): Path<Uuid>,
) -> ApiResult<Json<Option<DecisionResponse>>> {
    let decision = state
        .decision_log_service
        .latest_for(&profile, TenderId::from_uuid(tender_id))
        .await?;

    Ok(Json(decision.map(DecisionResponse::from)))
}
