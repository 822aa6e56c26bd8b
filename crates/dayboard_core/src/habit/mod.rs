//! Habits and their recurrence rules.
//!
//! A [`Habit`] carries exactly one [`Recurrence`] policy. Which days a habit
//! shows up on is decided by [`schedule`], and per-day or whole-habit deletion
//! by [`delete`]. Both work on borrowed slices and hand back new collections.

pub mod delete;
pub mod schedule;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::from_date_key;
use crate::error::DraftError;

pub use delete::{apply_delete, delete_occurrence, DeleteScope};
pub use schedule::{
    is_active_on, is_active_on_key, minutes_since_midnight, select_active_habits, sort_by_time,
    END_OF_DAY_MINUTES,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub category_id: String,
    /// Scheduled time of day as typed by the user, normally `HH:MM`.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl Habit {
    pub fn schedule_text(&self) -> &str {
        self.time.as_deref().unwrap_or("")
    }
}

/// Weekday indices use 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Recurrence {
    /// A single day. `None` once that day's occurrence has been deleted.
    Once {
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    /// Every day except the weekdays whose occurrence was deleted.
    Everyday {
        #[serde(default, rename = "skipDays")]
        skip_days: BTreeSet<u8>,
    },
    /// Only on the listed weekdays.
    Custom {
        #[serde(default)]
        days: BTreeSet<u8>,
    },
    /// Missing or unknown policy in stored data. Never active.
    #[default]
    #[serde(other)]
    Unrecognized,
}

impl Recurrence {
    pub fn kind(&self) -> Option<RecurrenceKind> {
        match self {
            Self::Once { .. } => Some(RecurrenceKind::Once),
            Self::Everyday { .. } => Some(RecurrenceKind::Everyday),
            Self::Custom { .. } => Some(RecurrenceKind::Custom),
            Self::Unrecognized => None,
        }
    }

    /// True when no date can ever match this policy again.
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Once { date: None } | Self::Unrecognized)
    }
}

/// Recurrence chosen in a creation payload. Names other than `once`,
/// `everyday` and `custom` decode to `Unknown` and are rejected by
/// [`HabitDraft::validate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceKind {
    Once,
    Everyday,
    Custom,
    Unknown(String),
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Once => "once",
            Self::Everyday => "everyday",
            Self::Custom => "custom",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for RecurrenceKind {
    fn from(name: String) -> Self {
        match name.trim() {
            "once" => Self::Once,
            "everyday" => Self::Everyday,
            "custom" => Self::Custom,
            _ => Self::Unknown(name),
        }
    }
}

impl From<RecurrenceKind> for String {
    fn from(kind: RecurrenceKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Habit creation payload as submitted by the creation form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HabitDraft {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceKind>,
    #[serde(default)]
    pub days: Option<Vec<u8>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl HabitDraft {
    pub fn new(title: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category_id: Some(category_id.into()),
            ..Self::default()
        }
    }

    pub fn once(mut self, date_key: impl Into<String>) -> Self {
        self.recurrence = Some(RecurrenceKind::Once);
        self.date = Some(date_key.into());
        self
    }

    pub fn everyday(mut self) -> Self {
        self.recurrence = Some(RecurrenceKind::Everyday);
        self
    }

    pub fn custom(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.recurrence = Some(RecurrenceKind::Custom);
        self.days = Some(days.into_iter().collect());
        self
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the payload and turns it into a habit with the given id.
    pub fn validate(self, id: impl Into<String>) -> Result<Habit, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let category_id = self
            .category_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(DraftError::MissingCategory)?;
        let kind = self.recurrence.ok_or(DraftError::MissingRecurrence)?;

        let recurrence = match kind {
            RecurrenceKind::Once => {
                let date = match self.date.as_deref().map(str::trim) {
                    None | Some("") => None,
                    Some(key) => Some(from_date_key(key)?),
                };
                Recurrence::Once { date }
            }
            RecurrenceKind::Everyday => Recurrence::Everyday {
                skip_days: BTreeSet::new(),
            },
            RecurrenceKind::Custom => {
                let days = self.days.unwrap_or_default();
                if let Some(&bad) = days.iter().find(|&&day| day > 6) {
                    return Err(DraftError::InvalidWeekday(bad));
                }
                Recurrence::Custom {
                    days: days.into_iter().collect(),
                }
            }
            RecurrenceKind::Unknown(name) => return Err(DraftError::UnknownRecurrence(name)),
        };

        Ok(Habit {
            id: id.into(),
            title: title.to_string(),
            notes: non_blank(self.notes),
            category_id,
            time: non_blank(self.time),
            recurrence,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
