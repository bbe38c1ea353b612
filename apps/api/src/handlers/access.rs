use axum::Json;
use axum::extract::{Extension, Query, State};
use bouwdesk_core::AppError;
use bouwdesk_domain::Profile;

use crate::dto::{AccessibleRoutesResponse, RouteAccessQuery, RouteAccessResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Answers whether the session role may open one portal route.
///
/// A denial is answered with `allowed: false` and lands in the audit trail.
pub async fn route_access_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
    Query(query): Query<RouteAccessQuery>,
) -> ApiResult<Json<RouteAccessResponse>> {
    let allowed = match state
        .authorizer
        .require_route(&profile, query.path.as_str())
        .await
    {
        Ok(()) => true,
        Err(AppError::Forbidden(_)) => false,
        Err(error) => return Err(error.into()),
    };
    let matched_pattern = state
        .authorizer
        .permission_table()
        .resolve_route(query.path.as_str())
        .map(|matched| matched.pattern.to_owned());

    Ok(Json(RouteAccessResponse {
        path: query.path,
        allowed,
        matched_pattern,
    }))
}

pub async fn accessible_routes_handler(
    State(state): State<AppState>,
    Extension(profile): Extension<Profile>,
) -> ApiResult<Json<AccessibleRoutesResponse>> {
    Ok(Json(AccessibleRoutesResponse {
        routes: state.authorizer.accessible_routes(profile.role()),
    }))
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::extract::{Extension, Query, State};
    use bouwdesk_application::AuditAction;
    use bouwdesk_domain::Role;

    use crate::dto::RouteAccessQuery;
    use crate::test_support::{profile, test_state, test_state_with_audit};

    use super::{accessible_routes_handler, route_access_handler};

    async fn check(role: Role, path: &str) -> (bool, Option<String>) {
        let actor = profile(role);
        let state = test_state(&[]).await;
        let Json(response) = route_access_handler(
            State(state),
            Extension(actor),
            Query(RouteAccessQuery {
                path: path.to_owned(),
            }),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

        (response.allowed, response.matched_pattern)
    }

    #[tokio::test]
    async fn nested_routes_resolve_to_most_specific_pattern() {
        assert_eq!(
            check(Role::Viewer, "/dashboard/tenders/42").await,
            (false, Some("/dashboard/tenders".to_owned()))
        );
        assert_eq!(
            check(Role::Sales, "/dashboard/tenders/42").await,
            (true, Some("/dashboard/tenders".to_owned()))
        );
        assert_eq!(
            check(Role::Viewer, "/dashboard").await,
            (true, Some("/dashboard".to_owned()))
        );
    }

    #[tokio::test]
    async fn denied_route_checks_are_audited() {
        let (state, audit_repository) = test_state_with_audit(&[]).await;
        let viewer = profile(Role::Viewer);

        let Json(denied) = route_access_handler(
            State(state.clone()),
            Extension(viewer.clone()),
            Query(RouteAccessQuery {
                path: "/dashboard/settings".to_owned(),
            }),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
        assert!(!denied.allowed);

        let Json(allowed) = route_access_handler(
            State(state),
            Extension(viewer.clone()),
            Query(RouteAccessQuery {
                path: "/dashboard".to_owned(),
            }),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
        assert!(allowed.allowed);

        let events = audit_repository.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, AuditAction::AccessDenied);
        assert_eq!(events[0].resource_type, "route");
        assert_eq!(events[0].resource_id, "/dashboard/settings");
        assert_eq!(events[0].subject, viewer.id().to_string());
    }

    #[tokio::test]
    async fn unclassified_routes_are_open() {
        assert_eq!(check(Role::Viewer, "/projecten/sluis-weurt").await, (true, None));
    }

    #[tokio::test]
    async fn accessible_routes_follow_the_role() {
        let state = test_state(&[]).await;
        let Json(hr) = accessible_routes_handler(State(state.clone()), Extension(profile(Role::Hr)))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(
            hr.routes,
            vec!["/dashboard".to_owned(), "/dashboard/hr".to_owned()]
        );

        let Json(directie) =
            accessible_routes_handler(State(state), Extension(profile(Role::Directie)))
                .await
                .unwrap_or_else(|_| unreachable!());
        assert_eq!(directie.routes.len(), 8);
    }
}
