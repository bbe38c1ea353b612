use std::sync::Arc;

use bouwdesk_application::{Authorizer, DecisionLogService, ProfileRepository, TenderService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorizer: Authorizer,
    pub tender_service: TenderService,
    pub decision_log_service: DecisionLogService,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
