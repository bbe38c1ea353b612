use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use bouwdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Named operations the portal gates independently of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Allows reading sales leads.
    #[serde(rename = "leads:read")]
    LeadsRead,
    /// Allows mutating sales leads.
    #[serde(rename = "leads:write")]
    LeadsWrite,
    /// Allows reading reference cases.
    #[serde(rename = "cases:read")]
    CasesRead,
    /// Allows mutating reference cases.
    #[serde(rename = "cases:write")]
    CasesWrite,
    /// Allows reading tenders and their decision log.
    #[serde(rename = "tenders:read")]
    TendersRead,
    /// Allows ingesting tenders, editing checklists and moving tenders through the lifecycle.
    #[serde(rename = "tenders:write")]
    TendersWrite,
    /// Allows reading compliance reports.
    #[serde(rename = "compliance:read")]
    ComplianceRead,
    /// Allows reading personnel records.
    #[serde(rename = "hr:read")]
    HrRead,
    /// Allows changing portal settings.
    #[serde(rename = "settings:write")]
    SettingsWrite,
}

impl Action {
    /// Returns the stable action name used as permission table key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadsRead => "leads:read",
            Self::LeadsWrite => "leads:write",
            Self::CasesRead => "cases:read",
            Self::CasesWrite => "cases:write",
            Self::TendersRead => "tenders:read",
            Self::TendersWrite => "tenders:write",
            Self::ComplianceRead => "compliance:read",
            Self::HrRead => "hr:read",
            Self::SettingsWrite => "settings:write",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[
            Action::LeadsRead,
            Action::LeadsWrite,
            Action::CasesRead,
            Action::CasesWrite,
            Action::TendersRead,
            Action::TendersWrite,
            Action::ComplianceRead,
            Action::HrRead,
            Action::SettingsWrite,
        ];

        ALL
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown action value '{value}'")))
    }
}

/// Serialized shape of a permission policy file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PermissionTableDocument {
    #[serde(default)]
    routes: BTreeMap<String, Vec<Role>>,
    #[serde(default)]
    actions: BTreeMap<String, Vec<Role>>,
}

/// Route pattern that matched a concrete route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Pattern key from the table.
    pub pattern: &'a str,
    /// Roles allowed by that pattern.
    pub roles: &'a BTreeSet<Role>,
}

/// Immutable policy data mapping routes and actions to allowed roles.
///
/// Routes missing from the table are open to every role; actions missing
/// from the table are closed to every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    routes: BTreeMap<String, BTreeSet<Role>>,
    actions: BTreeMap<String, BTreeSet<Role>>,
}

impl PermissionTable {
    /// Creates a validated table from route and action entries.
    pub fn new<R, RK, RV, A, AK, AV>(routes: R, actions: A) -> AppResult<Self>
    where
        R: IntoIterator<Item = (RK, RV)>,
        RK: Into<String>,
        RV: IntoIterator<Item = Role>,
        A: IntoIterator<Item = (AK, AV)>,
        AK: Into<String>,
        AV: IntoIterator<Item = Role>,
    {
        let mut route_entries = BTreeMap::new();
        for (pattern, roles) in routes {
            let pattern = pattern.into();
            validate_route_pattern(pattern.as_str())?;
            if route_entries
                .insert(pattern.clone(), roles.into_iter().collect())
                .is_some()
            {
                return Err(AppError::Validation(format!(
                    "route pattern '{pattern}' is defined more than once"
                )));
            }
        }

        let mut action_entries = BTreeMap::new();
        for (action, roles) in actions {
            let action = action.into();
            if action.trim().is_empty() || action.trim() != action {
                return Err(AppError::Validation(format!(
                    "action name '{action}' must be non-empty without surrounding whitespace"
                )));
            }
            if action_entries
                .insert(action.clone(), roles.into_iter().collect())
                .is_some()
            {
                return Err(AppError::Validation(format!(
                    "action '{action}' is defined more than once"
                )));
            }
        }

        Ok(Self {
            routes: route_entries,
            actions: action_entries,
        })
    }

    /// Parses a JSON policy document of the form
    /// `{ "routes": { "/x": ["ADMIN"] }, "actions": { "x:read": ["ADMIN"] } }`.
    pub fn from_json(document: &str) -> AppResult<Self> {
        let document: PermissionTableDocument = serde_json::from_str(document)
            .map_err(|error| AppError::Validation(format!("invalid permission table: {error}")))?;

        Self::new(document.routes, document.actions)
    }

    /// Returns the built-in policy for the operations portal.
    #[must_use]
    pub fn portal_defaults() -> Self {
        use Role::{Admin, Directie, Hr, Operations, Sales, Viewer};

        let routes: [(&str, &[Role]); 8] = [
            (
                "/dashboard",
                &[Viewer, Operations, Hr, Sales, Admin, Directie],
            ),
            ("/dashboard/leads", &[Sales, Admin, Directie]),
            ("/dashboard/cases", &[Operations, Sales, Admin, Directie]),
            ("/dashboard/projects", &[Operations, Admin, Directie]),
            ("/dashboard/tenders", &[Sales, Admin, Directie]),
            ("/dashboard/hr", &[Hr, Admin, Directie]),
            ("/dashboard/compliance", &[Admin, Directie]),
            ("/dashboard/settings", &[Admin, Directie]),
        ];

        let actions: [(Action, &[Role]); 9] = [
            (Action::LeadsRead, &[Sales, Admin, Directie]),
            (Action::LeadsWrite, &[Sales, Admin, Directie]),
            (Action::CasesRead, &[Operations, Sales, Admin, Directie]),
            (Action::CasesWrite, &[Operations, Admin, Directie]),
            (Action::TendersRead, &[Sales, Admin, Directie]),
            (Action::TendersWrite, &[Sales, Admin, Directie]),
            (Action::ComplianceRead, &[Admin, Directie]),
            (Action::HrRead, &[Hr, Admin, Directie]),
            (Action::SettingsWrite, &[Admin, Directie]),
        ];

        Self {
            routes: routes
                .into_iter()
                .map(|(pattern, roles)| (pattern.to_owned(), roles.iter().copied().collect()))
                .collect(),
            actions: actions
                .into_iter()
                .map(|(action, roles)| (action.as_str().to_owned(), roles.iter().copied().collect()))
                .collect(),
        }
    }

    /// Resolves the most specific pattern covering `route`.
    ///
    /// A literal entry wins; otherwise the longest pattern `p` with
    /// `route == p` or `route` starting with `p + "/"` is used.
    #[must_use]
    pub fn resolve_route(&self, route: &str) -> Option<RouteMatch<'_>> {
        let route = normalize_route(route);

        if let Some((pattern, roles)) = self.routes.get_key_value(route) {
            return Some(RouteMatch {
                pattern: pattern.as_str(),
                roles,
            });
        }

        self.routes
            .iter()
            .filter(|(pattern, _)| route_is_under(route, pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(pattern, roles)| RouteMatch {
                pattern: pattern.as_str(),
                roles,
            })
    }

    /// Returns the roles allowed to perform `action`, if the action is defined.
    #[must_use]
    pub fn roles_for_action(&self, action: &str) -> Option<&BTreeSet<Role>> {
        self.actions.get(action)
    }

    /// Iterates over route patterns and their roles in pattern order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &BTreeSet<Role>)> {
        self.routes
            .iter()
            .map(|(pattern, roles)| (pattern.as_str(), roles))
    }

    /// Iterates over action names and their roles in name order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &BTreeSet<Role>)> {
        self.actions
            .iter()
            .map(|(action, roles)| (action.as_str(), roles))
    }
}

fn validate_route_pattern(pattern: &str) -> AppResult<()> {
    if !pattern.starts_with('/') {
        return Err(AppError::Validation(format!(
            "route pattern '{pattern}' must start with '/'"
        )));
    }

    if pattern.len() > 1 && pattern.ends_with('/') {
        return Err(AppError::Validation(format!(
            "route pattern '{pattern}' must not end with '/'"
        )));
    }

    if pattern.contains(['?', '#']) || pattern.contains(char::is_whitespace) {
        return Err(AppError::Validation(format!(
            "route pattern '{pattern}' must be a plain path"
        )));
    }

    Ok(())
}

fn normalize_route(route: &str) -> &str {
    let path = route
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn route_is_under(route: &str, pattern: &str) -> bool {
    route == pattern
        || route
            .strip_prefix(pattern)
            .is_some_and(|rest| rest.starts_with('/'))
}
