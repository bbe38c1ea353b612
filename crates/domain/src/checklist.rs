use std::collections::BTreeMap;
use std::str::FromStr;

use bouwdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum characters accepted in one checklist note.
pub const CHECKLIST_NOTES_MAX_LENGTH: usize = 2_000;

/// Fixed due-diligence criteria reviewed before a Go/No-Go decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    /// Crew and equipment capacity is available.
    Capacity,
    /// Project risk has been assessed.
    Risk,
    /// Expected margin is acceptable.
    Margin,
    /// Planning fits the tender deadline and execution window.
    Planning,
    /// Required reference projects are available.
    References,
}

impl ChecklistItem {
    /// Returns a stable storage value for this item.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capacity => "capacity",
            Self::Risk => "risk",
            Self::Margin => "margin",
            Self::Planning => "planning",
            Self::References => "references",
        }
    }

    /// Returns all checklist items in review order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ChecklistItem] = &[
            ChecklistItem::Capacity,
            ChecklistItem::Risk,
            ChecklistItem::Margin,
            ChecklistItem::Planning,
            ChecklistItem::References,
        ];

        ALL
    }
}

impl FromStr for ChecklistItem {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "capacity" => Ok(Self::Capacity),
            "risk" => Ok(Self::Risk),
            "margin" => Ok(Self::Margin),
            "planning" => Ok(Self::Planning),
            "references" => Ok(Self::References),
            _ => Err(AppError::Validation(format!(
                "unknown checklist item '{value}'"
            ))),
        }
    }
}

/// Review state of one checklist item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    /// Whether the reviewer ticked the item.
    pub checked: bool,
    /// Free-text reviewer notes.
    pub notes: String,
}

impl ChecklistEntry {
    /// Creates a validated checklist entry.
    pub fn new(checked: bool, notes: impl Into<String>) -> AppResult<Self> {
        let notes = notes.into();
        if notes.chars().count() > CHECKLIST_NOTES_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "checklist notes must not exceed {CHECKLIST_NOTES_MAX_LENGTH} characters"
            )));
        }

        Ok(Self { checked, notes })
    }
}

/// Advisory Go/No-Go checklist for a tender's current review cycle.
///
/// Items never written read as unchecked with empty notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoNoGoChecklist {
    entries: BTreeMap<ChecklistItem, ChecklistEntry>,
}

impl GoNoGoChecklist {
    /// Creates an empty checklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a checklist from transport keys, rejecting unknown items.
    pub fn from_entries<K>(entries: impl IntoIterator<Item = (K, ChecklistEntry)>) -> AppResult<Self>
    where
        K: AsRef<str>,
    {
        let mut checklist = Self::new();
        for (key, entry) in entries {
            let item = ChecklistItem::from_str(key.as_ref())?;
            checklist.set(item, entry);
        }

        Ok(checklist)
    }

    /// Sets the entry of one item.
    pub fn set(&mut self, item: ChecklistItem, entry: ChecklistEntry) {
        self.entries.insert(item, entry);
    }

    /// Returns the entry of one item, if written.
    #[must_use]
    pub fn get(&self, item: ChecklistItem) -> Option<&ChecklistEntry> {
        self.entries.get(&item)
    }

    /// Overlays `update` onto this checklist; items in `update` win.
    #[must_use]
    pub fn merged_with(&self, update: &Self) -> Self {
        let mut merged = self.clone();
        for (item, entry) in &update.entries {
            merged.entries.insert(*item, entry.clone());
        }
        merged
    }

    /// Returns items that are not checked, in review order.
    #[must_use]
    pub fn unchecked_items(&self) -> Vec<ChecklistItem> {
        ChecklistItem::all()
            .iter()
            .copied()
            .filter(|item| !self.get(*item).is_some_and(|entry| entry.checked))
            .collect()
    }

    /// Returns every item with its entry, defaulting unwritten items.
    #[must_use]
    pub fn items(&self) -> Vec<(ChecklistItem, ChecklistEntry)> {
        ChecklistItem::all()
            .iter()
            .map(|item| (*item, self.get(*item).cloned().unwrap_or_default()))
            .collect()
    }

    /// Iterates over written entries only.
    pub fn written_entries(&self) -> impl Iterator<Item = (ChecklistItem, &ChecklistEntry)> {
        self.entries.iter().map(|(item, entry)| (*item, entry))
    }
}
