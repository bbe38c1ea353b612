use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use bouwdesk_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(app_state.frontend_url.as_str())?;

    let protected_routes = Router::new()
        .route(
            "/api/tenders",
            get(handlers::tenders::list_tenders_handler)
                .post(handlers::tenders::ingest_tender_handler),
        )
        .route(
            "/api/tenders/{tender_id}",
            get(handlers::tenders::get_tender_handler),
        )
        .route(
            "/api/tenders/{tender_id}/transitions",
            post(handlers::tenders::transition_tender_handler),
        )
        .route(
            "/api/tenders/{tender_id}/checklist",
            put(handlers::tenders::save_checklist_handler),
        )
        .route(
            "/api/tenders/{tender_id}/decisions",
            get(handlers::tenders::list_decisions_handler),
        )
        .route(
            "/api/tenders/{tender_id}/decisions/latest",
            get(handlers::tenders::latest_decision_handler),
        )
        .route(
            "/api/access/route",
            get(handlers::access::route_access_handler),
        )
        .route(
            "/api/access/routes",
            get(handlers::access::accessible_routes_handler),
        )
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
