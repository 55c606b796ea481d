// Data models for the task list

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format accepted for due dates on input
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Store-assigned task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(TaskId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// The other state; applying it twice is the identity
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    /// Label of the action that flips this status
    pub fn toggle_label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Done",
            TaskStatus::Completed => "Undo",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A dated to-do item
///
/// Text and due date are fixed at creation. Status only changes through
/// [`crate::TaskStore::toggle`], so the fields are private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    text: String,
    due_date: NaiveDate,
    status: TaskStatus,
}

impl Task {
    pub(crate) fn new(id: TaskId, text: String, due_date: NaiveDate) -> Self {
        Self {
            id,
            text,
            due_date,
            status: TaskStatus::Pending,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Pending and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::Pending && self.due_date < today
    }

    pub(crate) fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT)
}
