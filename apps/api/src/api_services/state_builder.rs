use std::sync::Arc;

use bouwdesk_application::{
    AuditRepository, Authorizer, DecisionLogService, ProfileRepository, TenderService,
};
use bouwdesk_core::AppError;
use bouwdesk_infrastructure::{
    PostgresAuditRepository, PostgresProfileRepository, PostgresTenderRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::notifier::build_notifier;
use super::permissions::load_permission_table;

pub async fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let permission_table = load_permission_table(config.permission_table_path.as_deref()).await?;
    let audit_repository: Arc<dyn AuditRepository> =
        Arc::new(PostgresAuditRepository::new(pool.clone()));
    let profile_repository: Arc<dyn ProfileRepository> =
        Arc::new(PostgresProfileRepository::new(pool.clone()));
    let tender_repository = Arc::new(PostgresTenderRepository::new(pool.clone()));
    let notifier = build_notifier(config)?;

    let authorizer = Authorizer::new(Arc::new(permission_table), audit_repository.clone());

    Ok(AppState {
        tender_service: TenderService::new(
            authorizer.clone(),
            tender_repository.clone(),
            notifier,
            audit_repository,
        ),
        decision_log_service: DecisionLogService::new(
            authorizer.clone(),
            tender_repository.clone(),
            tender_repository,
        ),
        authorizer,
        profile_repository,
        postgres_pool: pool,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    })
}
