//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod checklist;
mod decision;
mod lifecycle;
mod permission;
mod profile;
mod role;
mod tender;

pub use checklist::{CHECKLIST_NOTES_MAX_LENGTH, ChecklistEntry, ChecklistItem, GoNoGoChecklist};
pub use decision::{
    DECISION_REASON_MAX_LENGTH, Decision, DecisionActor, DecisionDraft, DecisionId, DecisionType,
};
pub use lifecycle::{TransitionPlan, plan_checklist_update, plan_transition};
pub use permission::{Action, PermissionTable, RouteMatch};
pub use profile::{Profile, ProfileId};
pub use role::Role;
pub use tender::{MATCH_SCORE_MAX, Tender, TenderDetails, TenderId, TenderStatus};
