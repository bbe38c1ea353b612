use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use bouwdesk_core::AppError;
use bouwdesk_domain::Profile;
use tower_sessions::Session;

use crate::dto::ProfileResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
) -> ApiResult<Json<ProfileResponse>> {
    let permitted_actions = state.authorizer.permitted_actions(profile.role());
    let accessible_routes = state.authorizer.accessible_routes(profile.role());

    Ok(Json(ProfileResponse::from_profile_with_access(
        profile,
        permitted_actions,
        accessible_routes,
    )))
}
