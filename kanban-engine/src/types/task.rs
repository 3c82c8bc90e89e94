//! Task types: Task, Priority, Deadline

use super::ids::{ColumnId, TagId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task/card on the kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// Column the task lives in. Always equal to the key of the list holding it.
    pub column_id: ColumnId,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Deadline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task in the given column
    pub fn new(text: impl Into<String>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            column_id: column_id.into(),
            priority: Priority::default(),
            deadline: None,
            description: None,
            tags: Vec::new(),
            completed_at: None,
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the deadline
    pub fn with_deadline(mut self, deadline: impl Into<Deadline>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }

    /// Classify the deadline relative to `today`, if the task has a readable one
    pub fn deadline_status(&self, today: NaiveDate) -> Option<DeadlineStatus> {
        self.deadline.as_ref()?.status(today)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = crate::KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(crate::KanbanError::invalid_value(
                "priority",
                format!("'{other}' is not one of low, medium, high"),
            )),
        }
    }
}

/// A deadline as the user entered it.
///
/// Stored verbatim so that persisted state round-trips byte for byte. Either a
/// calendar date (`2024-05-01`) or an RFC 3339 datetime; only the date part
/// matters for status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(String);

impl Deadline {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date of the deadline, if it parses
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|dt| dt.date())
    }

    /// Signed number of days from `today` until the deadline
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.date().map(|d| (d - today).num_days())
    }

    pub fn status(&self, today: NaiveDate) -> Option<DeadlineStatus> {
        self.days_until(today).map(|days| match days {
            d if d < 0 => DeadlineStatus::Overdue { days_late: -d },
            0 => DeadlineStatus::Today,
            d => DeadlineStatus::Upcoming { days_left: d },
        })
    }
}

impl From<&str> for Deadline {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Deadline {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<NaiveDate> for Deadline {
    fn from(d: NaiveDate) -> Self {
        Self(d.format("%Y-%m-%d").to_string())
    }
}

/// Where a deadline sits relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeadlineStatus {
    Overdue { days_late: i64 },
    Today,
    Upcoming { days_left: i64 },
}
