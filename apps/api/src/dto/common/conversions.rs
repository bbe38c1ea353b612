use bouwdesk_domain::Profile;

use super::types::ProfileResponse;

impl ProfileResponse {
    /// Creates a response from the profile and its resolved access.
    #[must_use]
    pub fn from_profile_with_access(
        profile: Profile,
        permitted_actions: Vec<String>,
        accessible_routes: Vec<String>,
    ) -> Self {
        Self {
            profile_id: profile.id().to_string(),
            email: profile.email().to_owned(),
            display_name: profile.display_name().to_owned(),
            role: profile.role().as_str().to_owned(),
            permitted_actions,
            accessible_routes,
        }
    }
}
