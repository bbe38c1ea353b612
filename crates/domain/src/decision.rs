use std::str::FromStr;

use bouwdesk_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Profile, ProfileId, TenderId, TenderStatus};

/// Maximum decision reason length, in characters.
pub const DECISION_REASON_MAX_LENGTH: usize = 2_000;

fn checked_reason(reason: &str) -> AppResult<NonEmptyString> {
    let reason = NonEmptyString::new(reason.trim())?;
    if reason.as_str().chars().count() > DECISION_REASON_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "decision reason must not exceed {DECISION_REASON_MAX_LENGTH} characters"
        )));
    }

    Ok(reason)
}

/// Unique identifier for a decision log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(Uuid);

impl DecisionId {
    /// Creates a new random decision identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a decision identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Outcome of a Go/No-Go review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Pursue the tender.
    Go,
    /// Abandon the tender.
    NoGo,
}

impl DecisionType {
    /// Returns a stable storage value for this decision type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::NoGo => "no_go",
        }
    }

    /// Returns the tender status this decision moves the tender into.
    #[must_use]
    pub fn resulting_status(&self) -> TenderStatus {
        match self {
            Self::Go => TenderStatus::Go,
            Self::NoGo => TenderStatus::NoGo,
        }
    }

    /// Returns the decision recorded by a transition into `status`, if any.
    #[must_use]
    pub fn for_status(status: TenderStatus) -> Option<Self> {
        match status {
            TenderStatus::Go => Some(Self::Go),
            TenderStatus::NoGo => Some(Self::NoGo),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::NoGo => "NO-GO",
        }
    }
}

impl FromStr for DecisionType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "go" => Ok(Self::Go),
            "no_go" => Ok(Self::NoGo),
            _ => Err(AppError::Validation(format!(
                "unknown decision type '{value}'"
            ))),
        }
    }
}

/// Profile that recorded a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionActor {
    /// Deciding profile.
    pub profile_id: ProfileId,
    /// Display name captured at decision time.
    pub display_name: String,
}

impl From<&Profile> for DecisionActor {
    fn from(profile: &Profile) -> Self {
        Self {
            profile_id: profile.id(),
            display_name: profile.display_name().to_owned(),
        }
    }
}

/// Decision content before the log assigns identity and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionDraft {
    decision_type: DecisionType,
    reason: NonEmptyString,
    decided_by: DecisionActor,
}

impl DecisionDraft {
    /// Creates a draft; the reason must contain non-whitespace text and
    /// stay within [`DECISION_REASON_MAX_LENGTH`].
    pub fn new(
        decision_type: DecisionType,
        reason: &str,
        decided_by: DecisionActor,
    ) -> AppResult<Self> {
        Ok(Self {
            decision_type,
            reason: checked_reason(reason)?,
            decided_by,
        })
    }

    /// Returns the decision type.
    #[must_use]
    pub fn decision_type(&self) -> DecisionType {
        self.decision_type
    }

    /// Returns the justification.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Returns the deciding profile.
    #[must_use]
    pub fn decided_by(&self) -> &DecisionActor {
        &self.decided_by
    }

    /// Seals the draft into an immutable log entry.
    #[must_use]
    pub fn into_decision(
        self,
        id: DecisionId,
        tender_id: TenderId,
        decided_at: DateTime<Utc>,
    ) -> Decision {
        Decision {
            id,
            tender_id,
            decision_type: self.decision_type,
            reason: self.reason.into(),
            decided_by: self.decided_by,
            decided_at,
        }
    }
}

/// Immutable Go/No-Go decision log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    id: DecisionId,
    tender_id: TenderId,
    decision_type: DecisionType,
    reason: String,
    decided_by: DecisionActor,
    decided_at: DateTime<Utc>,
}

impl Decision {
    /// Rebuilds a decision from persisted state.
    pub fn restore(
        id: DecisionId,
        tender_id: TenderId,
        decision_type: DecisionType,
        reason: String,
        decided_by: DecisionActor,
        decided_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let reason = checked_reason(reason.as_str())?;
        Ok(Self {
            id,
            tender_id,
            decision_type,
            reason: reason.into(),
            decided_by,
            decided_at,
        })
    }

    /// Returns the decision identifier.
    #[must_use]
    pub fn id(&self) -> DecisionId {
        self.id
    }

    /// Returns the tender the decision belongs to.
    #[must_use]
    pub fn tender_id(&self) -> TenderId {
        self.tender_id
    }

    /// Returns the decision type.
    #[must_use]
    pub fn decision_type(&self) -> DecisionType {
        self.decision_type
    }

    /// Returns the justification.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Returns the deciding profile.
    #[must_use]
    pub fn decided_by(&self) -> &DecisionActor {
        &self.decided_by
    }

    /// Returns the server timestamp assigned at append time.
    #[must_use]
    pub fn decided_at(&self) -> DateTime<Utc> {
        self.decided_at
    }

    /// Renders a single-line audit summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} by {} at {}: {}",
            self.decision_type.label(),
            self.decided_by.display_name,
            self.decided_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.reason
        )
    }
}
