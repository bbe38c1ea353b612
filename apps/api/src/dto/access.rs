use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query for a single route check.
#[derive(Debug, Deserialize)]
pub struct RouteAccessQuery {
    pub path: String,
}

/// Answer to "may the session open this route".
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/route-access-response.ts"
)]
pub struct RouteAccessResponse {
    pub path: String,
    pub allowed: bool,
    /// Table pattern that decided the answer; `null` for open routes.
    pub matched_pattern: Option<String>,
}

/// Route patterns the session may open.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/accessible-routes-response.ts"
)]
pub struct AccessibleRoutesResponse {
    pub routes: Vec<String>,
}
