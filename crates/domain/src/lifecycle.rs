//! Tender lifecycle rules.
//!
//! Legal edges:
//!
//! ```text
//! new -> analyzing -> go -> in_preparation -> submitted -> won | lost
//!                  \-> no_go
//! ```
//!
//! `go` and `no_go` are decision transitions. They need a non-empty reason
//! and may start from `analyzing`, or from `new` as an implicit start of the
//! review. `no_go`, `won` and `lost` have no outgoing edges.

use bouwdesk_core::{AppError, AppResult};
use chrono::{DateTime, Utc};

use crate::{DecisionActor, DecisionDraft, DecisionType, GoNoGoChecklist, Tender, TenderStatus};

impl TenderStatus {
    /// Returns the administrative successors of this status.
    #[must_use]
    pub fn successors(self) -> &'static [TenderStatus] {
        match self {
            Self::New => &[Self::Analyzing],
            Self::Analyzing => &[Self::Go, Self::NoGo],
            Self::Go => &[Self::InPreparation],
            Self::InPreparation => &[Self::Submitted],
            Self::Submitted => &[Self::Won, Self::Lost],
            Self::NoGo | Self::Won | Self::Lost => &[],
        }
    }

    /// Returns whether `to` is a legal edge from this status.
    #[must_use]
    pub fn can_transition_to(self, to: TenderStatus) -> bool {
        self.successors().contains(&to) || (to.is_decision() && self.is_under_review())
    }

    /// Returns whether a transition into this status records a decision.
    #[must_use]
    pub fn is_decision(self) -> bool {
        DecisionType::for_status(self).is_some()
    }

    /// Returns whether this status is terminally archived.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Returns whether the Go/No-Go review cycle is still open.
    #[must_use]
    pub fn is_under_review(self) -> bool {
        matches!(self, Self::New | Self::Analyzing)
    }
}

/// Validated state change ready to be committed.
///
/// Only [`plan_transition`] and [`plan_checklist_update`] construct plans,
/// so every plan describes a legal edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    from: TenderStatus,
    to: TenderStatus,
    checklist: Option<GoNoGoChecklist>,
    decision: Option<DecisionDraft>,
}

impl TransitionPlan {
    /// Returns the status the plan was computed from.
    #[must_use]
    pub fn from(&self) -> TenderStatus {
        self.from
    }

    /// Returns the target status.
    #[must_use]
    pub fn to(&self) -> TenderStatus {
        self.to
    }

    /// Returns the full checklist to store with the change, if it changes.
    #[must_use]
    pub fn checklist(&self) -> Option<&GoNoGoChecklist> {
        self.checklist.as_ref()
    }

    /// Returns the decision to append with the change, if any.
    #[must_use]
    pub fn decision(&self) -> Option<&DecisionDraft> {
        self.decision.as_ref()
    }

    /// Consumes the plan, returning the decision draft.
    #[must_use]
    pub fn into_decision(self) -> Option<DecisionDraft> {
        self.decision
    }

    /// Returns whether the plan changes the status.
    #[must_use]
    pub fn changes_status(&self) -> bool {
        self.from != self.to
    }
}

/// Plans a status change for `tender`.
///
/// A checklist update supplied with the request is merged into the stored
/// checklist and is only accepted while the review is open.
pub fn plan_transition(
    tender: &Tender,
    to: TenderStatus,
    reason: Option<&str>,
    checklist_update: Option<&GoNoGoChecklist>,
    actor: DecisionActor,
) -> AppResult<TransitionPlan> {
    let from = tender.status();

    if !from.can_transition_to(to) {
        let detail = if from.is_terminal() {
            "tender is archived in a terminal state"
        } else if to.is_decision() {
            "decisions can only be recorded while the tender is under review"
        } else if from.successors().is_empty() {
            "no transitions leave this state"
        } else {
            "not a legal lifecycle edge"
        };
        return Err(AppError::illegal_transition(from, to, detail));
    }

    let decision = match DecisionType::for_status(to) {
        Some(decision_type) => {
            let reason = reason.unwrap_or_default();
            if reason.trim().is_empty() {
                return Err(AppError::illegal_transition(
                    from,
                    to,
                    "decision transitions require a reason",
                ));
            }
            Some(DecisionDraft::new(decision_type, reason, actor)?)
        }
        None => None,
    };

    let checklist = checklist_update
        .map(|update| checklist_for_review(tender, to, update))
        .transpose()?;

    Ok(TransitionPlan {
        from,
        to,
        checklist,
        decision,
    })
}

/// Plans a checklist save; on a `new` tender this also starts the review.
pub fn plan_checklist_update(
    tender: &Tender,
    update: &GoNoGoChecklist,
) -> AppResult<TransitionPlan> {
    let from = tender.status();
    let to = match from {
        TenderStatus::New => TenderStatus::Analyzing,
        other => other,
    };

    Ok(TransitionPlan {
        from,
        to,
        checklist: Some(checklist_for_review(tender, to, update)?),
        decision: None,
    })
}

fn checklist_for_review(
    tender: &Tender,
    to: TenderStatus,
    update: &GoNoGoChecklist,
) -> AppResult<GoNoGoChecklist> {
    if !tender.status().is_under_review() {
        return Err(AppError::illegal_transition(
            tender.status(),
            to,
            "the Go/No-Go checklist is locked once the review has closed",
        ));
    }

    Ok(tender.checklist().merged_with(update))
}

impl Tender {
    /// Applies a committed plan, enforcing that the stored status still
    /// equals the status the plan was computed from.
    pub fn apply_plan(&mut self, plan: &TransitionPlan, at: DateTime<Utc>) -> AppResult<()> {
        if self.status() != plan.from() {
            return Err(AppError::Conflict(format!(
                "tender '{}' moved from '{}' to '{}' concurrently; re-fetch and retry",
                self.id(),
                plan.from(),
                self.status()
            )));
        }

        let checklist = plan
            .checklist()
            .cloned()
            .unwrap_or_else(|| self.checklist().clone());
        self.set_state(plan.to(), checklist, at);
        Ok(())
    }
}
