use super::*;

impl Authorizer {
    /// Returns the table's route patterns `role` may open, in pattern order.
    #[must_use]
    pub fn accessible_routes(&self, role: Role) -> Vec<String> {
        self.permissions
            .routes()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(pattern, _)| pattern.to_owned())
            .collect()
    }

    /// Returns the action names `role` may perform, in name order.
    #[must_use]
    pub fn permitted_actions(&self, role: Role) -> Vec<String> {
        self.permissions
            .actions()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(action, _)| action.to_owned())
            .collect()
    }
}
