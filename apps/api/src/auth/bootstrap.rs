use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bouwdesk_core::AppError;
use bouwdesk_domain::ProfileId;
use chrono::Utc;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::state::AppState;

use super::{BootstrapRequest, SESSION_CREATED_AT_KEY, SESSION_PROFILE_KEY};

pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        warn!("session bootstrap rejected: invalid token");
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let profile_id = ProfileId::parse(payload.profile_id.as_str())?;
    let profile = state
        .profile_repository
        .find_profile(profile_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("unknown profile '{profile_id}'")))?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_PROFILE_KEY, &profile)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session profile: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    info!(
        profile_id = %profile.id(),
        role = profile.role().as_str(),
        "session bootstrapped"
    );
    Ok(StatusCode::NO_CONTENT)
}
