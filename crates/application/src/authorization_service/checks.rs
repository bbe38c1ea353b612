use bouwdesk_domain::Action;

use super::*;

impl Authorizer {
    /// Returns whether `role` may open `route`.
    ///
    /// Routes without a covering pattern are open to every role.
    #[must_use]
    pub fn can_access_route(&self, role: Role, route: &str) -> bool {
        self.permissions
            .resolve_route(route)
            .is_none_or(|matched| matched.roles.contains(&role))
    }

    /// Returns whether `role` may perform the named action.
    ///
    /// Actions missing from the table are denied to every role.
    #[must_use]
    pub fn can_perform_action(&self, role: Role, action: &str) -> bool {
        self.permissions
            .roles_for_action(action)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Ensures the profile may perform `action`, auditing denials.
    pub async fn require_action(&self, profile: &Profile, action: Action) -> AppResult<()> {
        if self.can_perform_action(profile.role(), action.as_str()) {
            return Ok(());
        }

        self.record_denial(profile, "action", action.as_str()).await;
        Err(AppError::Forbidden(format!(
            "role '{}' may not perform '{}'",
            profile.role(),
            action.as_str()
        )))
    }

    /// Ensures the profile may open `route`, auditing denials.
    pub async fn require_route(&self, profile: &Profile, route: &str) -> AppResult<()> {
        if self.can_access_route(profile.role(), route) {
            return Ok(());
        }

        self.record_denial(profile, "route", route).await;
        Err(AppError::Forbidden(format!(
            "role '{}' may not open '{route}'",
            profile.role()
        )))
    }
}
