use std::collections::BTreeSet;
use std::str::FromStr;

use bouwdesk_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::GoNoGoChecklist;

/// Upper bound for a tender match score.
pub const MATCH_SCORE_MAX: u8 = 100;

/// Unique identifier for a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenderId(Uuid);

impl TenderId {
    /// Creates a new random tender identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a tender identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a tender identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid tender id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TenderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TenderId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Tender lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// Ingested, review not started.
    New,
    /// Go/No-Go review in progress.
    Analyzing,
    /// Decided to pursue.
    Go,
    /// Decided to abandon.
    NoGo,
    /// Bid is being prepared.
    InPreparation,
    /// Bid has been submitted to the buyer.
    Submitted,
    /// Bid was awarded.
    Won,
    /// Bid was not awarded.
    Lost,
}

impl TenderStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Analyzing => "analyzing",
            Self::Go => "go",
            Self::NoGo => "no_go",
            Self::InPreparation => "in_preparation",
            Self::Submitted => "submitted",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Returns all statuses in lifecycle order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TenderStatus] = &[
            TenderStatus::New,
            TenderStatus::Analyzing,
            TenderStatus::Go,
            TenderStatus::NoGo,
            TenderStatus::InPreparation,
            TenderStatus::Submitted,
            TenderStatus::Won,
            TenderStatus::Lost,
        ];

        ALL
    }

    /// Parses a transport value into a status.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for TenderStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown tender status '{value}'")))
    }
}

impl std::fmt::Display for TenderStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Descriptive tender attributes captured at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderDetails {
    /// Tender title as published by the buyer.
    pub title: String,
    /// Contracting authority.
    pub buyer: String,
    /// Estimated contract value in euro cents.
    pub estimate_cents: Option<i64>,
    /// Submission deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Opportunity source, e.g. the procurement platform name.
    pub source: String,
    /// Relevance score between 0 and 100.
    pub match_score: u8,
    /// Free-form classification tags.
    pub tags: BTreeSet<String>,
}

impl TenderDetails {
    fn validate(self) -> AppResult<Self> {
        let title = NonEmptyString::new(self.title.trim())
            .map_err(|_| AppError::Validation("tender title must not be empty".to_owned()))?;
        let buyer = NonEmptyString::new(self.buyer.trim())
            .map_err(|_| AppError::Validation("tender buyer must not be empty".to_owned()))?;
        let source = NonEmptyString::new(self.source.trim())
            .map_err(|_| AppError::Validation("tender source must not be empty".to_owned()))?;

        if self.estimate_cents.is_some_and(|value| value < 0) {
            return Err(AppError::Validation(
                "tender estimate must not be negative".to_owned(),
            ));
        }

        if self.match_score > MATCH_SCORE_MAX {
            return Err(AppError::Validation(format!(
                "tender match score must be between 0 and {MATCH_SCORE_MAX}"
            )));
        }

        let tags = self
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            title: title.into(),
            buyer: buyer.into(),
            estimate_cents: self.estimate_cents,
            deadline: self.deadline,
            source: source.into(),
            match_score: self.match_score,
            tags,
        })
    }
}

/// Tracked procurement opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tender {
    id: TenderId,
    details: TenderDetails,
    status: TenderStatus,
    checklist: GoNoGoChecklist,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Tender {
    /// Creates a freshly ingested tender in `new`.
    pub fn ingest(id: TenderId, details: TenderDetails, now: DateTime<Utc>) -> AppResult<Self> {
        Ok(Self {
            id,
            details: details.validate()?,
            status: TenderStatus::New,
            checklist: GoNoGoChecklist::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a tender from persisted state.
    pub fn restore(
        id: TenderId,
        details: TenderDetails,
        status: TenderStatus,
        checklist: GoNoGoChecklist,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            details: details.validate()?,
            status,
            checklist,
            created_at,
            updated_at,
        })
    }

    /// Returns the tender identifier.
    #[must_use]
    pub fn id(&self) -> TenderId {
        self.id
    }

    /// Returns descriptive attributes.
    #[must_use]
    pub fn details(&self) -> &TenderDetails {
        &self.details
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> TenderStatus {
        self.status
    }

    /// Returns the checklist of the current review cycle.
    #[must_use]
    pub fn checklist(&self) -> &GoNoGoChecklist {
        &self.checklist
    }

    /// Returns the ingestion timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the last committed change.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn set_state(
        &mut self,
        status: TenderStatus,
        checklist: GoNoGoChecklist,
        at: DateTime<Utc>,
    ) {
        self.status = status;
        self.checklist = checklist;
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use chrono::Utc;

    use super::{Tender, TenderDetails, TenderId, TenderStatus};
    use crate::GoNoGoChecklist;

    fn details() -> TenderDetails {
        TenderDetails {
            title: "  Renovatie brug Zuidas ".to_owned(),
            buyer: "Gemeente Amsterdam".to_owned(),
            estimate_cents: Some(250_000_000),
            deadline: None,
            source: "TenderNed".to_owned(),
            match_score: 82,
            tags: BTreeSet::from([" Civiel ".to_owned(), String::new()]),
        }
    }

    #[test]
    fn ingest_starts_in_new_and_normalizes_details() {
        let tender = Tender::ingest(TenderId::new(), details(), Utc::now());
        assert!(tender.is_ok());

        let tender = tender.unwrap_or_else(|_| unreachable!());
        assert_eq!(tender.status(), TenderStatus::New);
        assert_eq!(tender.details().title, "Renovatie brug Zuidas");
        assert_eq!(tender.details().tags, BTreeSet::from(["civiel".to_owned()]));
        assert_eq!(tender.checklist().unchecked_items().len(), 5);
    }

    #[test]
    fn ingest_rejects_invalid_details() {
        let mut negative = details();
        negative.estimate_cents = Some(-1);
        assert!(Tender::ingest(TenderId::new(), negative, Utc::now()).is_err());

        let mut score = details();
        score.match_score = 101;
        assert!(Tender::ingest(TenderId::new(), score, Utc::now()).is_err());

        let mut title = details();
        title.title = "   ".to_owned();
        assert!(Tender::ingest(TenderId::new(), title, Utc::now()).is_err());
    }

    #[test]
    fn restore_revalidates_stored_details() {
        let restore = |details: TenderDetails| {
            Tender::restore(
                TenderId::new(),
                details,
                TenderStatus::Submitted,
                GoNoGoChecklist::new(),
                Utc::now(),
                Utc::now(),
            )
        };

        let restored = restore(details());
        assert_eq!(
            restored.map(|tender| tender.status()).ok(),
            Some(TenderStatus::Submitted)
        );

        let mut blank_buyer = details();
        blank_buyer.buyer = String::new();
        assert!(restore(blank_buyer).is_err());
    }

    #[test]
    fn status_roundtrip_storage_value() {
        for status in TenderStatus::all() {
            let restored = TenderStatus::from_str(status.as_str());
            assert_eq!(restored.ok(), Some(*status));
        }
        assert!(TenderStatus::from_str("archived").is_err());
    }
}
